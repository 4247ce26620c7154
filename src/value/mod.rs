//! Kind-erased element values and the per-kind primitive table
//!
//! [`Value`] is an owned scalar of any [`NumericKind`], used at the typed
//! boundary of the engine: kind-erased get/set, permutation coercion, and
//! arithmetic on owning composite kinds.
//!
//! The unsafe slot primitives at the bottom of this module are the uniform
//! construct/destroy/copy/read/write operations the matrix entity and the
//! operation kernels dispatch through. Trivial kinds are plain byte
//! reads/writes; owning kinds store a pointer-sized handle to a boxed
//! payload in the slot.

mod symbolic;

pub use symbolic::Expr;

use crate::alloc::AllocRef;
use crate::error::{Error, Result};
use crate::kind::{Complex64, Complex128, NumericKind};
use crate::matrix::{Matrix, StorageOrder};
use crate::ops::BinaryOp;
use num_bigint::BigInt;
use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use std::fmt;
use std::ptr;

/// Complex number with arbitrary-precision rational components
pub type BigComplex = Complex<BigRational>;

/// An owned element value of any kind
#[derive(Debug, PartialEq)]
pub enum Value {
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// 64-bit complex
    Complex64(Complex64),
    /// 128-bit complex
    Complex128(Complex128),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// Arbitrary-precision rational
    Rational(BigRational),
    /// Complex with rational components
    BigComplex(BigComplex),
    /// Symbolic expression
    Expr(Expr),
    /// Nested matrix
    Nested(Matrix),
}

impl Value {
    /// The kind this value belongs to
    pub fn kind(&self) -> NumericKind {
        match self {
            Self::U8(_) => NumericKind::U8,
            Self::U16(_) => NumericKind::U16,
            Self::U32(_) => NumericKind::U32,
            Self::U64(_) => NumericKind::U64,
            Self::I8(_) => NumericKind::I8,
            Self::I16(_) => NumericKind::I16,
            Self::I32(_) => NumericKind::I32,
            Self::I64(_) => NumericKind::I64,
            Self::F32(_) => NumericKind::F32,
            Self::F64(_) => NumericKind::F64,
            Self::Complex64(_) => NumericKind::Complex64,
            Self::Complex128(_) => NumericKind::Complex128,
            Self::BigInt(_) => NumericKind::BigInt,
            Self::Rational(_) => NumericKind::Rational,
            Self::BigComplex(_) => NumericKind::BigComplex,
            Self::Expr(_) => NumericKind::Expr,
            Self::Nested(_) => NumericKind::Nested,
        }
    }

    /// Zero value of the given kind
    ///
    /// The nested-matrix zero is a 1x1 zeroed f64 matrix built through
    /// `alloc`, so this constructor is fallible.
    pub fn zero(kind: NumericKind, alloc: &AllocRef) -> Result<Self> {
        Ok(match kind {
            NumericKind::U8 => Self::U8(0),
            NumericKind::U16 => Self::U16(0),
            NumericKind::U32 => Self::U32(0),
            NumericKind::U64 => Self::U64(0),
            NumericKind::I8 => Self::I8(0),
            NumericKind::I16 => Self::I16(0),
            NumericKind::I32 => Self::I32(0),
            NumericKind::I64 => Self::I64(0),
            NumericKind::F32 => Self::F32(0.0),
            NumericKind::F64 => Self::F64(0.0),
            NumericKind::Complex64 => Self::Complex64(Complex64::ZERO),
            NumericKind::Complex128 => Self::Complex128(Complex128::ZERO),
            NumericKind::BigInt => Self::BigInt(BigInt::zero()),
            NumericKind::Rational => Self::Rational(BigRational::zero()),
            NumericKind::BigComplex => {
                Self::BigComplex(Complex::new(BigRational::zero(), BigRational::zero()))
            }
            NumericKind::Expr => Self::Expr(Expr::zero()),
            NumericKind::Nested => Self::Nested(Matrix::zeroed(
                alloc,
                1,
                1,
                NumericKind::F64,
                StorageOrder::RowMajor,
            )?),
        })
    }

    /// Deep copy of this value
    ///
    /// Fallible because nested matrices clone through their allocator.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(match self {
            Self::U8(v) => Self::U8(*v),
            Self::U16(v) => Self::U16(*v),
            Self::U32(v) => Self::U32(*v),
            Self::U64(v) => Self::U64(*v),
            Self::I8(v) => Self::I8(*v),
            Self::I16(v) => Self::I16(*v),
            Self::I32(v) => Self::I32(*v),
            Self::I64(v) => Self::I64(*v),
            Self::F32(v) => Self::F32(*v),
            Self::F64(v) => Self::F64(*v),
            Self::Complex64(v) => Self::Complex64(*v),
            Self::Complex128(v) => Self::Complex128(*v),
            Self::BigInt(v) => Self::BigInt(v.clone()),
            Self::Rational(v) => Self::Rational(v.clone()),
            Self::BigComplex(v) => Self::BigComplex(v.clone()),
            Self::Expr(v) => Self::Expr(v.clone()),
            Self::Nested(m) => Self::Nested(m.try_clone()?),
        })
    }

    /// Coerce this value to a non-negative index, if it is integral
    ///
    /// Used to validate permutation vector entries: fixed-width integers,
    /// integer-valued floats, big integers, and integral rationals coerce;
    /// everything else returns `None`.
    pub fn to_index(&self) -> Option<usize> {
        match self {
            Self::U8(v) => Some(*v as usize),
            Self::U16(v) => Some(*v as usize),
            Self::U32(v) => usize::try_from(*v).ok(),
            Self::U64(v) => usize::try_from(*v).ok(),
            Self::I8(v) => usize::try_from(*v).ok(),
            Self::I16(v) => usize::try_from(*v).ok(),
            Self::I32(v) => usize::try_from(*v).ok(),
            Self::I64(v) => usize::try_from(*v).ok(),
            Self::F32(v) => float_index(*v as f64),
            Self::F64(v) => float_index(*v),
            Self::BigInt(v) => v.to_usize(),
            Self::Rational(v) => {
                if v.is_integer() {
                    v.to_integer().to_usize()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Apply a binary arithmetic operation in this kind's own representation
    ///
    /// Both operands must share a kind. Nested matrices delegate back into
    /// the engine: add/sub/div are elementwise, mul is the matrix product.
    pub fn binary(op: BinaryOp, lhs: &Self, rhs: &Self) -> Result<Self> {
        macro_rules! trivial {
            ($variant:ident, $a:expr, $b:expr) => {
                Ok(Self::$variant(op.apply(*$a, *$b)))
            };
        }

        match (lhs, rhs) {
            (Self::U8(a), Self::U8(b)) => trivial!(U8, a, b),
            (Self::U16(a), Self::U16(b)) => trivial!(U16, a, b),
            (Self::U32(a), Self::U32(b)) => trivial!(U32, a, b),
            (Self::U64(a), Self::U64(b)) => trivial!(U64, a, b),
            (Self::I8(a), Self::I8(b)) => trivial!(I8, a, b),
            (Self::I16(a), Self::I16(b)) => trivial!(I16, a, b),
            (Self::I32(a), Self::I32(b)) => trivial!(I32, a, b),
            (Self::I64(a), Self::I64(b)) => trivial!(I64, a, b),
            (Self::F32(a), Self::F32(b)) => trivial!(F32, a, b),
            (Self::F64(a), Self::F64(b)) => trivial!(F64, a, b),
            (Self::Complex64(a), Self::Complex64(b)) => trivial!(Complex64, a, b),
            (Self::Complex128(a), Self::Complex128(b)) => trivial!(Complex128, a, b),
            (Self::BigInt(a), Self::BigInt(b)) => Ok(Self::BigInt(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
            })),
            (Self::Rational(a), Self::Rational(b)) => Ok(Self::Rational(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
            })),
            (Self::BigComplex(a), Self::BigComplex(b)) => Ok(Self::BigComplex(match op {
                BinaryOp::Add => a.clone() + b.clone(),
                BinaryOp::Sub => a.clone() - b.clone(),
                BinaryOp::Mul => a.clone() * b.clone(),
                BinaryOp::Div => a.clone() / b.clone(),
            })),
            (Self::Expr(a), Self::Expr(b)) => Ok(Self::Expr(match op {
                BinaryOp::Add => a.clone() + b.clone(),
                BinaryOp::Sub => a.clone() - b.clone(),
                BinaryOp::Mul => a.clone() * b.clone(),
                BinaryOp::Div => a.clone() / b.clone(),
            })),
            (Self::Nested(a), Self::Nested(b)) => {
                let alloc = a.allocator().clone();
                let m = match op {
                    BinaryOp::Add => crate::ops::add(&alloc, a, b)?,
                    BinaryOp::Sub => crate::ops::sub(&alloc, a, b)?,
                    BinaryOp::Mul => crate::ops::matmul(&alloc, a, b)?,
                    BinaryOp::Div => crate::ops::div(&alloc, a, b)?,
                };
                Ok(Self::Nested(m))
            }
            _ => Err(Error::kind_mismatch(lhs.kind(), rhs.kind())),
        }
    }
}

fn float_index(v: f64) -> Option<usize> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 {
        Some(v as usize)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Complex64(v) => write!(f, "{v}"),
            Self::Complex128(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Rational(v) => write!(f, "{v}"),
            Self::BigComplex(v) => write!(f, "{v}"),
            Self::Expr(v) => write!(f, "{v}"),
            Self::Nested(m) => write!(f, "{m}"),
        }
    }
}

// ============================================================================
// Slot primitives
//
// The uniform per-kind operations the matrix entity dispatches through.
// A slot is `kind.stride()` bytes inside a matrix buffer. For owning kinds
// the slot holds a `*mut Payload` handle; a null handle marks a slot that
// was never constructed (possible only during construction rollback) and is
// skipped by destroy.
// ============================================================================

unsafe fn write_box<T>(slot: *mut u8, value: T) {
    ptr::write(slot as *mut *mut T, Box::into_raw(Box::new(value)));
}

unsafe fn drop_box<T>(slot: *mut u8) {
    let handle = ptr::read(slot as *const *mut T);
    if !handle.is_null() {
        drop(Box::from_raw(handle));
        ptr::write(slot as *mut *mut T, ptr::null_mut());
    }
}

unsafe fn payload<'a, T>(slot: *const u8) -> &'a T {
    let handle = ptr::read(slot as *const *const T);
    debug_assert!(!handle.is_null(), "read of unconstructed owning slot");
    &*handle
}

/// Construct the kind's zero value into an owning slot
///
/// # Safety
/// `slot` must be a valid, unconstructed (null-handle) slot of an
/// owning-kind buffer.
pub(crate) unsafe fn construct_zero(
    kind: NumericKind,
    slot: *mut u8,
    alloc: &AllocRef,
) -> Result<()> {
    match kind {
        NumericKind::BigInt => write_box(slot, BigInt::zero()),
        NumericKind::Rational => write_box(slot, BigRational::zero()),
        NumericKind::BigComplex => write_box(
            slot,
            BigComplex::new(BigRational::zero(), BigRational::zero()),
        ),
        NumericKind::Expr => write_box(slot, Expr::zero()),
        NumericKind::Nested => {
            let m = Matrix::zeroed(alloc, 1, 1, NumericKind::F64, StorageOrder::RowMajor)?;
            write_box(slot, m);
        }
        _ => debug_assert!(false, "construct_zero on trivial kind"),
    }
    Ok(())
}

/// Destroy an owning slot's payload; null handles are skipped
///
/// # Safety
/// `slot` must be a valid slot of an owning-kind buffer.
pub(crate) unsafe fn destroy_slot(kind: NumericKind, slot: *mut u8) {
    match kind {
        NumericKind::BigInt => drop_box::<BigInt>(slot),
        NumericKind::Rational => drop_box::<BigRational>(slot),
        NumericKind::BigComplex => drop_box::<BigComplex>(slot),
        NumericKind::Expr => drop_box::<Expr>(slot),
        NumericKind::Nested => drop_box::<Matrix>(slot),
        _ => {}
    }
}

/// Read a slot into an owned [`Value`] (deep copy for owning kinds)
///
/// # Safety
/// `slot` must be a valid, constructed slot of a `kind` buffer.
pub(crate) unsafe fn read_slot(kind: NumericKind, slot: *const u8) -> Result<Value> {
    Ok(match kind {
        NumericKind::U8 => Value::U8(ptr::read(slot)),
        NumericKind::U16 => Value::U16(ptr::read(slot as *const u16)),
        NumericKind::U32 => Value::U32(ptr::read(slot as *const u32)),
        NumericKind::U64 => Value::U64(ptr::read(slot as *const u64)),
        NumericKind::I8 => Value::I8(ptr::read(slot as *const i8)),
        NumericKind::I16 => Value::I16(ptr::read(slot as *const i16)),
        NumericKind::I32 => Value::I32(ptr::read(slot as *const i32)),
        NumericKind::I64 => Value::I64(ptr::read(slot as *const i64)),
        NumericKind::F32 => Value::F32(ptr::read(slot as *const f32)),
        NumericKind::F64 => Value::F64(ptr::read(slot as *const f64)),
        NumericKind::Complex64 => Value::Complex64(ptr::read(slot as *const Complex64)),
        NumericKind::Complex128 => Value::Complex128(ptr::read(slot as *const Complex128)),
        NumericKind::BigInt => Value::BigInt(payload::<BigInt>(slot).clone()),
        NumericKind::Rational => Value::Rational(payload::<BigRational>(slot).clone()),
        NumericKind::BigComplex => Value::BigComplex(payload::<BigComplex>(slot).clone()),
        NumericKind::Expr => Value::Expr(payload::<Expr>(slot).clone()),
        NumericKind::Nested => Value::Nested(payload::<Matrix>(slot).try_clone()?),
    })
}

/// Write an owned [`Value`] into a slot, destroying any previous payload
///
/// # Safety
/// `slot` must be a valid slot of a `kind` buffer. For owning kinds the
/// slot's handle must be either null or a previously constructed payload.
pub(crate) unsafe fn write_slot(kind: NumericKind, slot: *mut u8, value: Value) -> Result<()> {
    if value.kind() != kind {
        return Err(Error::kind_mismatch(kind, value.kind()));
    }
    match value {
        Value::U8(v) => ptr::write(slot, v),
        Value::U16(v) => ptr::write(slot as *mut u16, v),
        Value::U32(v) => ptr::write(slot as *mut u32, v),
        Value::U64(v) => ptr::write(slot as *mut u64, v),
        Value::I8(v) => ptr::write(slot as *mut i8, v),
        Value::I16(v) => ptr::write(slot as *mut i16, v),
        Value::I32(v) => ptr::write(slot as *mut i32, v),
        Value::I64(v) => ptr::write(slot as *mut i64, v),
        Value::F32(v) => ptr::write(slot as *mut f32, v),
        Value::F64(v) => ptr::write(slot as *mut f64, v),
        Value::Complex64(v) => ptr::write(slot as *mut Complex64, v),
        Value::Complex128(v) => ptr::write(slot as *mut Complex128, v),
        Value::BigInt(v) => {
            drop_box::<BigInt>(slot);
            write_box(slot, v);
        }
        Value::Rational(v) => {
            drop_box::<BigRational>(slot);
            write_box(slot, v);
        }
        Value::BigComplex(v) => {
            drop_box::<BigComplex>(slot);
            write_box(slot, v);
        }
        Value::Expr(v) => {
            drop_box::<Expr>(slot);
            write_box(slot, v);
        }
        Value::Nested(v) => {
            drop_box::<Matrix>(slot);
            write_box(slot, v);
        }
    }
    Ok(())
}

/// Compare two constructed slots of the same kind for logical equality
///
/// # Safety
/// Both slots must be valid, constructed slots of `kind` buffers.
pub(crate) unsafe fn eq_slots(kind: NumericKind, a: *const u8, b: *const u8) -> bool {
    match kind {
        NumericKind::U8 => ptr::read(a) == ptr::read(b),
        NumericKind::U16 => ptr::read(a as *const u16) == ptr::read(b as *const u16),
        NumericKind::U32 => ptr::read(a as *const u32) == ptr::read(b as *const u32),
        NumericKind::U64 => ptr::read(a as *const u64) == ptr::read(b as *const u64),
        NumericKind::I8 => ptr::read(a as *const i8) == ptr::read(b as *const i8),
        NumericKind::I16 => ptr::read(a as *const i16) == ptr::read(b as *const i16),
        NumericKind::I32 => ptr::read(a as *const i32) == ptr::read(b as *const i32),
        NumericKind::I64 => ptr::read(a as *const i64) == ptr::read(b as *const i64),
        NumericKind::F32 => ptr::read(a as *const f32) == ptr::read(b as *const f32),
        NumericKind::F64 => ptr::read(a as *const f64) == ptr::read(b as *const f64),
        NumericKind::Complex64 => {
            ptr::read(a as *const Complex64) == ptr::read(b as *const Complex64)
        }
        NumericKind::Complex128 => {
            ptr::read(a as *const Complex128) == ptr::read(b as *const Complex128)
        }
        NumericKind::BigInt => payload::<BigInt>(a) == payload::<BigInt>(b),
        NumericKind::Rational => payload::<BigRational>(a) == payload::<BigRational>(b),
        NumericKind::BigComplex => payload::<BigComplex>(a) == payload::<BigComplex>(b),
        NumericKind::Expr => payload::<Expr>(a) == payload::<Expr>(b),
        NumericKind::Nested => payload::<Matrix>(a) == payload::<Matrix>(b),
    }
}

/// Render a constructed slot without copying its payload
///
/// # Safety
/// `slot` must be a valid, constructed slot of a `kind` buffer.
pub(crate) unsafe fn fmt_slot(
    kind: NumericKind,
    slot: *const u8,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match kind {
        NumericKind::U8 => write!(f, "{}", ptr::read(slot)),
        NumericKind::U16 => write!(f, "{}", ptr::read(slot as *const u16)),
        NumericKind::U32 => write!(f, "{}", ptr::read(slot as *const u32)),
        NumericKind::U64 => write!(f, "{}", ptr::read(slot as *const u64)),
        NumericKind::I8 => write!(f, "{}", ptr::read(slot as *const i8)),
        NumericKind::I16 => write!(f, "{}", ptr::read(slot as *const i16)),
        NumericKind::I32 => write!(f, "{}", ptr::read(slot as *const i32)),
        NumericKind::I64 => write!(f, "{}", ptr::read(slot as *const i64)),
        NumericKind::F32 => write!(f, "{}", ptr::read(slot as *const f32)),
        NumericKind::F64 => write!(f, "{}", ptr::read(slot as *const f64)),
        NumericKind::Complex64 => write!(f, "{}", ptr::read(slot as *const Complex64)),
        NumericKind::Complex128 => write!(f, "{}", ptr::read(slot as *const Complex128)),
        NumericKind::BigInt => write!(f, "{}", payload::<BigInt>(slot)),
        NumericKind::Rational => write!(f, "{}", payload::<BigRational>(slot)),
        NumericKind::BigComplex => write!(f, "{}", payload::<BigComplex>(slot)),
        NumericKind::Expr => write!(f, "{}", payload::<Expr>(slot)),
        NumericKind::Nested => write!(f, "{}", payload::<Matrix>(slot)),
    }
}
