//! Element kind system for matr matrices
//!
//! This module provides the `NumericKind` enum representing all supported
//! element kinds, the stride/lifecycle registry over them, and the `Element`
//! trait connecting Rust scalar types to runtime kinds.

pub mod complex;
mod element;

pub use complex::{Complex64, Complex128};
pub use element::Element;

use std::fmt;

/// Lifecycle class of an element kind
///
/// `Trivial` kinds have a flat byte representation: zeroed memory is a valid
/// element and copies are plain byte copies. `Owning` kinds hold their own
/// heap resources, so every buffer slot must be explicitly constructed when
/// a matrix is created and destroyed when it is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Flat copy is safe; no construct/destroy needed
    Trivial,
    /// Each slot must be constructed and destroyed individually
    Owning,
}

/// Element kinds supported by matr matrices
///
/// This enum represents the element type of a matrix at runtime. Using an
/// enum (rather than making `Matrix` generic) allows runtime kind selection
/// and lets one matrix type hold both plain scalars and resource-owning
/// composite numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NumericKind {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// 64-bit complex (two f32: re, im)
    Complex64,
    /// 128-bit complex (two f64: re, im)
    Complex128,

    // Composite kinds. Buffer slots hold a pointer-sized handle to a boxed
    // payload, so their stride is the pointer width.
    /// Arbitrary-precision signed integer
    BigInt,
    /// Arbitrary-precision rational fraction
    Rational,
    /// Complex number with arbitrary-precision rational components
    BigComplex,
    /// Symbolic expression tree
    Expr,
    /// Nested matrix (matrix-of-matrices)
    Nested,
}

/// Pointer width of a composite slot handle
const HANDLE_STRIDE: usize = std::mem::size_of::<*mut u8>();

impl NumericKind {
    /// Bytes per buffer slot for this kind
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
            Self::BigInt | Self::Rational | Self::BigComplex | Self::Expr | Self::Nested => {
                HANDLE_STRIDE
            }
        }
    }

    /// Required slot alignment for buffer allocation
    ///
    /// Complex128 is two f64 fields, so its alignment is 8 despite the
    /// 16-byte stride.
    #[inline]
    pub const fn align(self) -> usize {
        match self {
            Self::Complex128 => 8,
            _ => self.stride(),
        }
    }

    /// Lifecycle class of this kind
    #[inline]
    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            Self::BigInt | Self::Rational | Self::BigComplex | Self::Expr | Self::Nested => {
                Lifecycle::Owning
            }
            _ => Lifecycle::Trivial,
        }
    }

    /// Returns true if this kind's slots own heap resources
    #[inline]
    pub const fn is_owning(self) -> bool {
        matches!(self.lifecycle(), Lifecycle::Owning)
    }

    /// Returns true if this is a fixed-width signed integer kind
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8)
    }

    /// Returns true if this is a fixed-width unsigned integer kind
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U64 | Self::U32 | Self::U16 | Self::U8)
    }

    /// Returns true if this is any fixed-width integer kind
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Returns true if this is a fixed-width floating point kind
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true if this is a fixed-width complex kind
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Short name for display (e.g., "f32", "bigint")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex64 => "c64",
            Self::Complex128 => "c128",
            Self::BigInt => "bigint",
            Self::Rational => "rational",
            Self::BigComplex => "bigcomplex",
            Self::Expr => "expr",
            Self::Nested => "matrix",
        }
    }

    /// All trivial kinds, in declaration order
    pub const TRIVIAL: [Self; 12] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Complex64,
        Self::Complex128,
    ];

    /// All owning composite kinds, in declaration order
    pub const OWNING: [Self; 5] = [
        Self::BigInt,
        Self::Rational,
        Self::BigComplex,
        Self::Expr,
        Self::Nested,
    ];
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
