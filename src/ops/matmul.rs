//! Matrix multiplication, with the scalar-broadcast shortcut

use super::{arithmetic, check_kinds, dispatch_trivial, BinaryOp};
use crate::alloc::AllocRef;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::value::{self, Value};
use num_traits::Zero;

/// Matrix product `lhs * rhs`
///
/// Ordinary rule: `lhs.cols() == rhs.rows()`, output shape
/// `(lhs.rows(), rhs.cols())`, accumulation in the element kind's own
/// representation.
///
/// Shortcut: when the inner dimensions do not line up but either operand is
/// 1x1, the call degrades to elementwise scalar multiplication instead of
/// failing. This overloads one entry point with two operations and is kept
/// for compatibility; [`mul`](super::mul()) is the explicit elementwise form.
pub fn matmul(alloc: &AllocRef, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    check_kinds(lhs, rhs)?;
    if lhs.cols() != rhs.rows() {
        if lhs.is_scalar() || rhs.is_scalar() {
            return arithmetic::mul(alloc, lhs, rhs);
        }
        return Err(Error::shape_mismatch(lhs.shape(), rhs.shape()));
    }

    let (m, k, n) = (lhs.rows(), lhs.cols(), rhs.cols());
    let kind = lhs.kind();
    let mut out = Matrix::alloc_raw(alloc, m, n, kind, lhs.order())?;

    dispatch_trivial!(kind, T => {
        for r in 0..m {
            for c in 0..n {
                let mut acc = T::zero();
                for i in 0..k {
                    let a: T = lhs.read_elem(r, i);
                    let b: T = rhs.read_elem(i, c);
                    acc = acc + a * b;
                }
                out.write_elem(acc, r, c);
            }
        }
    }, _ => {
        for r in 0..m {
            for c in 0..n {
                let mut acc = Value::zero(kind, alloc)?;
                for i in 0..k {
                    let p = Value::binary(BinaryOp::Mul, &lhs.get_value(r, i)?, &rhs.get_value(i, c)?)?;
                    acc = Value::binary(BinaryOp::Add, &acc, &p)?;
                }
                unsafe { value::write_slot(kind, out.slot_mut(r, c), acc)? };
            }
        }
    });

    Ok(out)
}
