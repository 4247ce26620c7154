//! Human-readable matrix rendering

use super::Matrix;
use crate::value;
use std::fmt;

impl fmt::Display for Matrix {
    /// Renders the matrix as a bracketed grid, one row per line:
    ///
    /// ```text
    /// [[1, 2],
    ///  [3, 4]]
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for r in 0..self.rows() {
            if r > 0 {
                f.write_str(",\n ")?;
            }
            f.write_str("[")?;
            for c in 0..self.cols() {
                if c > 0 {
                    f.write_str(", ")?;
                }
                unsafe { value::fmt_slot(self.kind(), self.slot(r, c), f)? };
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("kind", &self.kind())
            .field("order", &self.order())
            .finish()
    }
}
