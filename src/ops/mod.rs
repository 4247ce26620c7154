//! Matrix operations: broadcasting arithmetic, multiplication, selection
//!
//! Every operation here is kind-generic: trivial kinds run a monomorphized
//! typed kernel selected by [`dispatch_trivial!`], owning kinds run a
//! kind-erased fallback through [`Value`](crate::value::Value). Both paths
//! address elements through the matrix entity's accessors, so row-major and
//! column-major operands mix freely.

mod arithmetic;
mod matmul;
mod select;
mod transpose;

pub use arithmetic::{add, add_assign, div, div_assign, mul, mul_assign, sub, sub_assign};
pub use matmul::matmul;
pub use select::select;
pub use transpose::transpose;

use crate::error::{Error, Result};
use crate::kind::Element;
use crate::matrix::Matrix;

/// Elementwise binary arithmetic operator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Elementwise addition
    Add,
    /// Elementwise subtraction
    Sub,
    /// Elementwise multiplication
    Mul,
    /// Elementwise division
    Div,
}

impl BinaryOp {
    /// Apply the operator to two trivial elements
    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Operator name, for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

/// Resolved output geometry of a broadcasting binary operation
#[derive(Debug)]
pub(crate) struct Broadcast {
    pub rows: usize,
    pub cols: usize,
    /// The 1x1 left operand repeats across the right's shape
    pub lhs_scalar: bool,
    /// The 1x1 right operand repeats across the left's shape
    pub rhs_scalar: bool,
}

/// Shapes combine when they are equal or exactly one operand is 1x1
pub(crate) fn resolve_broadcast(lhs: &Matrix, rhs: &Matrix) -> Result<Broadcast> {
    if lhs.shape() == rhs.shape() {
        Ok(Broadcast {
            rows: lhs.rows(),
            cols: lhs.cols(),
            lhs_scalar: false,
            rhs_scalar: false,
        })
    } else if lhs.is_scalar() {
        Ok(Broadcast {
            rows: rhs.rows(),
            cols: rhs.cols(),
            lhs_scalar: true,
            rhs_scalar: false,
        })
    } else if rhs.is_scalar() {
        Ok(Broadcast {
            rows: lhs.rows(),
            cols: lhs.cols(),
            lhs_scalar: false,
            rhs_scalar: true,
        })
    } else {
        Err(Error::shape_mismatch(lhs.shape(), rhs.shape()))
    }
}

/// Binary operations never coerce between kinds
pub(crate) fn check_kinds(lhs: &Matrix, rhs: &Matrix) -> Result<()> {
    if lhs.kind() != rhs.kind() {
        return Err(Error::kind_mismatch(lhs.kind(), rhs.kind()));
    }
    Ok(())
}

/// Dispatch a kernel over the runtime kind of a matrix.
///
/// Trivial kinds bind `$T` to the concrete element type and run `$trivial`
/// monomorphized; owning kinds fall through to `$owning`, which works on
/// kind-erased [`Value`](crate::value::Value)s instead.
macro_rules! dispatch_trivial {
    ($kind:expr, $T:ident => $trivial:block, _ => $owning:block) => {
        match $kind {
            $crate::kind::NumericKind::U8 => {
                type $T = u8;
                $trivial
            }
            $crate::kind::NumericKind::U16 => {
                type $T = u16;
                $trivial
            }
            $crate::kind::NumericKind::U32 => {
                type $T = u32;
                $trivial
            }
            $crate::kind::NumericKind::U64 => {
                type $T = u64;
                $trivial
            }
            $crate::kind::NumericKind::I8 => {
                type $T = i8;
                $trivial
            }
            $crate::kind::NumericKind::I16 => {
                type $T = i16;
                $trivial
            }
            $crate::kind::NumericKind::I32 => {
                type $T = i32;
                $trivial
            }
            $crate::kind::NumericKind::I64 => {
                type $T = i64;
                $trivial
            }
            $crate::kind::NumericKind::F32 => {
                type $T = f32;
                $trivial
            }
            $crate::kind::NumericKind::F64 => {
                type $T = f64;
                $trivial
            }
            $crate::kind::NumericKind::Complex64 => {
                type $T = $crate::kind::Complex64;
                $trivial
            }
            $crate::kind::NumericKind::Complex128 => {
                type $T = $crate::kind::Complex128;
                $trivial
            }
            _ => $owning,
        }
    };
}

pub(crate) use dispatch_trivial;
