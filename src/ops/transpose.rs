//! Matrix transposition

use super::dispatch_trivial;
use crate::alloc::AllocRef;
use crate::error::Result;
use crate::matrix::Matrix;

/// Allocate the transpose of `src`: `out[c][r] = src[r][c]`
///
/// The output keeps `src`'s kind and storage order; only the logical
/// positions move.
pub fn transpose(alloc: &AllocRef, src: &Matrix) -> Result<Matrix> {
    let kind = src.kind();
    let mut out = Matrix::alloc_raw(alloc, src.cols(), src.rows(), kind, src.order())?;

    dispatch_trivial!(kind, T => {
        for r in 0..src.rows() {
            for c in 0..src.cols() {
                let v: T = src.read_elem(r, c);
                out.write_elem(v, c, r);
            }
        }
    }, _ => {
        for r in 0..src.rows() {
            for c in 0..src.cols() {
                let v = src.get_value(r, c)?;
                out.set_value(v, c, r)?;
            }
        }
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::system;
    use crate::matrix::StorageOrder;

    #[test]
    fn test_transpose_rectangular() {
        let alloc = system();
        let a = Matrix::from_slice(
            &alloc,
            &[1i32, 2, 3, 4, 5, 6],
            2,
            3,
            StorageOrder::RowMajor,
        )
        .unwrap();
        let t = transpose(&alloc, &a).unwrap();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get::<i32>(0, 1).unwrap(), 4);
        assert_eq!(t.get::<i32>(2, 0).unwrap(), 3);
    }

    #[test]
    fn test_double_transpose_round_trips() {
        let alloc = system();
        let a = Matrix::from_slice(&alloc, &[1.5f64, -2.0, 0.0, 7.25], 2, 2, StorageOrder::ColMajor)
            .unwrap();
        let tt = transpose(&alloc, &transpose(&alloc, &a).unwrap()).unwrap();
        assert_eq!(tt, a);
    }
}
