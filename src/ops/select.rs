//! Permutation-based row/column selection

use crate::alloc::AllocRef;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Gather a new matrix from `src` using row and column index vectors
///
/// `rows` picks output rows from `src`'s rows, `cols` picks output columns
/// from `src`'s columns; an omitted vector defaults to the identity
/// permutation of that dimension. Indices may repeat or skip, so this is a
/// general gather, not only a reordering. The output has shape
/// `(rows.len(), cols.len())`, `src`'s kind and storage order, and
/// `out[i][j] = src[rows[i]][cols[j]]` by value (deep copy for owning
/// kinds).
pub fn select(
    alloc: &AllocRef,
    src: &Matrix,
    rows: Option<&Matrix>,
    cols: Option<&Matrix>,
) -> Result<Matrix> {
    let row_idx = resolve_permutation(rows, src.rows())?;
    let col_idx = resolve_permutation(cols, src.cols())?;

    let mut out = Matrix::alloc_raw(alloc, row_idx.len(), col_idx.len(), src.kind(), src.order())?;
    for (i, &r) in row_idx.iter().enumerate() {
        for (j, &c) in col_idx.iter().enumerate() {
            let v = src.get_value(r, c)?;
            out.set_value(v, i, j)?;
        }
    }
    Ok(out)
}

/// Validate an index vector against `bound`, or materialize the identity
///
/// The vector must be 1xN or Nx1, and every element must coerce to a
/// non-negative integer strictly below `bound`. Fractional, negative, and
/// out-of-range values are all `InvalidPermutation`.
fn resolve_permutation(perm: Option<&Matrix>, bound: usize) -> Result<Vec<usize>> {
    let perm = match perm {
        Some(p) => p,
        None => return Ok((0..bound).collect()),
    };
    if !perm.is_vector() {
        return Err(Error::ExpectedVector {
            rows: perm.rows(),
            cols: perm.cols(),
        });
    }

    let mut out = Vec::with_capacity(perm.elem_count());
    for r in 0..perm.rows() {
        for c in 0..perm.cols() {
            let v = perm.get_value(r, c)?;
            match v.to_index() {
                Some(i) if i < bound => out.push(i),
                _ => {
                    return Err(Error::InvalidPermutation {
                        value: v.to_string(),
                        bound,
                    })
                }
            }
        }
    }
    Ok(out)
}
