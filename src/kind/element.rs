//! Element trait mapping Rust scalar types to NumericKind

use super::{Complex64, Complex128, NumericKind};
use bytemuck::{Pod, Zeroable};
use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for Rust types that can back a trivial-kind matrix slot
///
/// This trait connects Rust's type system to matr's runtime kind system.
/// It is implemented for every trivial kind's scalar type; composite kinds
/// are accessed through [`crate::value::Value`] instead.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - basic scalar requirements
/// - `Pod + Zeroable` - safe byte-level reads/writes into matrix buffers
/// - `Add + Sub + Mul + Div` - elementwise arithmetic (Output = Self)
/// - `Zero + One` - additive/multiplicative identities for accumulation
/// - `PartialEq` - logical matrix equality
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Zero
    + One
    + PartialEq
{
    /// The corresponding NumericKind for this Rust type
    const KIND: NumericKind;
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl Element for $ty {
            const KIND: NumericKind = NumericKind::$kind;
        })*
    };
}

impl_element!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Complex64 => Complex64,
    Complex128 => Complex128,
);
