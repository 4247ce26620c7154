//! Broadcasting elementwise arithmetic, allocating and in-place

use super::{check_kinds, dispatch_trivial, resolve_broadcast, BinaryOp};
use crate::alloc::AllocRef;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::value::{self, Value};

/// Elementwise sum; shapes must match or one operand must be 1x1
pub fn add(alloc: &AllocRef, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    binary(alloc, BinaryOp::Add, lhs, rhs)
}

/// Elementwise difference
///
/// Broadcasting keeps operand sides: `scalar - M` subtracts each element of
/// `M` from the scalar, `M - scalar` subtracts the scalar from each element.
pub fn sub(alloc: &AllocRef, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    binary(alloc, BinaryOp::Sub, lhs, rhs)
}

/// Elementwise product (not the matrix product; see [`matmul`](super::matmul()))
pub fn mul(alloc: &AllocRef, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    binary(alloc, BinaryOp::Mul, lhs, rhs)
}

/// Elementwise quotient, with the same side-keeping broadcast as [`sub`]
pub fn div(alloc: &AllocRef, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    binary(alloc, BinaryOp::Div, lhs, rhs)
}

/// `lhs += rhs` in place; `rhs` must match `lhs`'s shape or be 1x1
pub fn add_assign(lhs: &mut Matrix, rhs: &Matrix) -> Result<()> {
    binary_assign(BinaryOp::Add, lhs, rhs)
}

/// `lhs -= rhs` in place
pub fn sub_assign(lhs: &mut Matrix, rhs: &Matrix) -> Result<()> {
    binary_assign(BinaryOp::Sub, lhs, rhs)
}

/// `lhs *= rhs` elementwise in place
pub fn mul_assign(lhs: &mut Matrix, rhs: &Matrix) -> Result<()> {
    binary_assign(BinaryOp::Mul, lhs, rhs)
}

/// `lhs /= rhs` elementwise in place
pub fn div_assign(lhs: &mut Matrix, rhs: &Matrix) -> Result<()> {
    binary_assign(BinaryOp::Div, lhs, rhs)
}

fn binary(alloc: &AllocRef, op: BinaryOp, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    check_kinds(lhs, rhs)?;
    let bc = resolve_broadcast(lhs, rhs)?;
    let kind = lhs.kind();
    // The output inherits the storage order of the non-scalar operand.
    let order = if bc.lhs_scalar { rhs.order() } else { lhs.order() };
    let mut out = Matrix::alloc_raw(alloc, bc.rows, bc.cols, kind, order)?;

    dispatch_trivial!(kind, T => {
        for r in 0..bc.rows {
            for c in 0..bc.cols {
                let a: T = if bc.lhs_scalar {
                    lhs.read_elem(0, 0)
                } else {
                    lhs.read_elem(r, c)
                };
                let b: T = if bc.rhs_scalar {
                    rhs.read_elem(0, 0)
                } else {
                    rhs.read_elem(r, c)
                };
                out.write_elem(op.apply(a, b), r, c);
            }
        }
    }, _ => {
        for r in 0..bc.rows {
            for c in 0..bc.cols {
                let a = if bc.lhs_scalar {
                    lhs.get_value(0, 0)?
                } else {
                    lhs.get_value(r, c)?
                };
                let b = if bc.rhs_scalar {
                    rhs.get_value(0, 0)?
                } else {
                    rhs.get_value(r, c)?
                };
                let v = Value::binary(op, &a, &b)?;
                // On error `out` drops with its already-written slots
                // destroyed and the untouched ones still null.
                unsafe { value::write_slot(kind, out.slot_mut(r, c), v)? };
            }
        }
    });

    Ok(out)
}

fn binary_assign(op: BinaryOp, lhs: &mut Matrix, rhs: &Matrix) -> Result<()> {
    check_kinds(lhs, rhs)?;
    // The destination cannot grow, so only the right side may broadcast.
    let rhs_scalar = lhs.shape() != rhs.shape();
    if rhs_scalar && !rhs.is_scalar() {
        return Err(Error::shape_mismatch(lhs.shape(), rhs.shape()));
    }
    let kind = lhs.kind();

    dispatch_trivial!(kind, T => {
        for r in 0..lhs.rows() {
            for c in 0..lhs.cols() {
                let a: T = lhs.read_elem(r, c);
                let b: T = if rhs_scalar {
                    rhs.read_elem(0, 0)
                } else {
                    rhs.read_elem(r, c)
                };
                lhs.write_elem(op.apply(a, b), r, c);
            }
        }
    }, _ => {
        for r in 0..lhs.rows() {
            for c in 0..lhs.cols() {
                let a = lhs.get_value(r, c)?;
                let b = if rhs_scalar {
                    rhs.get_value(0, 0)?
                } else {
                    rhs.get_value(r, c)?
                };
                let v = Value::binary(op, &a, &b)?;
                lhs.set_value(v, r, c)?;
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::system;
    use crate::kind::NumericKind;
    use crate::matrix::StorageOrder;

    fn m2x2(data: [f64; 4], order: StorageOrder) -> Matrix {
        Matrix::from_slice(&system(), &data, 2, 2, order).unwrap()
    }

    fn scalar(v: f64) -> Matrix {
        Matrix::from_slice(&system(), &[v], 1, 1, StorageOrder::RowMajor).unwrap()
    }

    #[test]
    fn test_add_same_shape() {
        let alloc = system();
        let a = m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::RowMajor);
        let b = m2x2([10.0, 20.0, 30.0, 40.0], StorageOrder::RowMajor);
        let c = add(&alloc, &a, &b).unwrap();
        assert_eq!(c, m2x2([11.0, 22.0, 33.0, 44.0], StorageOrder::RowMajor));
    }

    #[test]
    fn test_mixed_order_operands() {
        let alloc = system();
        let a = m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::RowMajor);
        let b = m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::ColMajor);
        let c = add(&alloc, &a, &b).unwrap();
        assert_eq!(c.get::<f64>(0, 1).unwrap(), 4.0);
        assert_eq!(c.get::<f64>(1, 0).unwrap(), 6.0);
    }

    #[test]
    fn test_scalar_broadcast_sub_asymmetry() {
        let alloc = system();
        let a = m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::RowMajor);
        let s = scalar(10.0);

        let left = sub(&alloc, &s, &a).unwrap();
        assert_eq!(left, m2x2([9.0, 8.0, 7.0, 6.0], StorageOrder::RowMajor));

        let right = sub(&alloc, &a, &s).unwrap();
        assert_eq!(right, m2x2([-9.0, -8.0, -7.0, -6.0], StorageOrder::RowMajor));
    }

    #[test]
    fn test_scalar_broadcast_div_asymmetry() {
        let alloc = system();
        let a = m2x2([1.0, 2.0, 4.0, 8.0], StorageOrder::RowMajor);
        let s = scalar(8.0);

        let left = div(&alloc, &s, &a).unwrap();
        assert_eq!(left, m2x2([8.0, 4.0, 2.0, 1.0], StorageOrder::RowMajor));

        let right = div(&alloc, &a, &s).unwrap();
        assert_eq!(right, m2x2([0.125, 0.25, 0.5, 1.0], StorageOrder::RowMajor));
    }

    #[test]
    fn test_shape_mismatch() {
        let alloc = system();
        let a = m2x2([0.0; 4], StorageOrder::RowMajor);
        let b = Matrix::zeroed(&alloc, 2, 3, NumericKind::F64, StorageOrder::RowMajor).unwrap();
        assert!(matches!(
            add(&alloc, &a, &b).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn test_kind_mismatch() {
        let alloc = system();
        let a = m2x2([0.0; 4], StorageOrder::RowMajor);
        let b = Matrix::zeroed(&alloc, 2, 2, NumericKind::F32, StorageOrder::RowMajor).unwrap();
        assert!(matches!(
            add(&alloc, &a, &b).unwrap_err(),
            Error::KindMismatch { .. }
        ));
    }

    #[test]
    fn test_in_place_add() {
        let mut a = m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::RowMajor);
        let b = m2x2([1.0, 1.0, 1.0, 1.0], StorageOrder::RowMajor);
        add_assign(&mut a, &b).unwrap();
        assert_eq!(a, m2x2([2.0, 3.0, 4.0, 5.0], StorageOrder::RowMajor));
    }

    #[test]
    fn test_in_place_scalar_rhs() {
        let mut a = m2x2([2.0, 4.0, 6.0, 8.0], StorageOrder::ColMajor);
        let s = scalar(2.0);
        div_assign(&mut a, &s).unwrap();
        assert_eq!(a, m2x2([1.0, 2.0, 3.0, 4.0], StorageOrder::RowMajor));
    }

    #[test]
    fn test_in_place_cannot_grow() {
        let mut s = scalar(1.0);
        let a = m2x2([0.0; 4], StorageOrder::RowMajor);
        assert!(matches!(
            add_assign(&mut s, &a).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn test_integer_division_truncates() {
        let alloc = system();
        let a = Matrix::from_slice(&alloc, &[7i32, 8, 9, 10], 2, 2, StorageOrder::RowMajor).unwrap();
        let s = Matrix::from_slice(&alloc, &[3i32], 1, 1, StorageOrder::RowMajor).unwrap();
        let q = div(&alloc, &a, &s).unwrap();
        assert_eq!(q.get::<i32>(0, 0).unwrap(), 2);
        assert_eq!(q.get::<i32>(1, 1).unwrap(), 3);
    }
}
