//! Error types for matr

use crate::kind::NumericKind;
use thiserror::Error;

/// Result type alias using matr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies which allocator entry point reported failure
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AllocCall {
    /// Plain allocation
    Alloc,
    /// Zero-initialized allocation
    ZeroAlloc,
    /// In-place resize
    Realloc,
}

impl std::fmt::Display for AllocCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Alloc => "allocate",
            Self::ZeroAlloc => "zero_allocate",
            Self::Realloc => "resize",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in matr operations
#[derive(Error, Debug)]
pub enum Error {
    /// A dimension of zero was requested
    #[error("invalid matrix size: {rows}x{cols} (dimensions must be non-zero)")]
    InvalidSize {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Buffer size arithmetic overflowed
    #[error("capacity overflow: {rows}x{cols} elements of stride {stride}")]
    CapacityOverflow {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
        /// Element stride in bytes
        stride: usize,
    },

    /// Element index outside the matrix bounds
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix row count
        rows: usize,
        /// Matrix column count
        cols: usize,
    },

    /// Element kind mismatch between operands, or between a typed access
    /// and the matrix's declared kind
    #[error("kind mismatch: {lhs} vs {rhs}")]
    KindMismatch {
        /// Left-hand side (or declared) kind
        lhs: NumericKind,
        /// Right-hand side (or requested) kind
        rhs: NumericKind,
    },

    /// Shape mismatch not resolvable by scalar broadcast
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// Left-hand side (rows, cols)
        lhs: (usize, usize),
        /// Right-hand side (rows, cols)
        rhs: (usize, usize),
    },

    /// A permutation argument was not a 1xN or Nx1 matrix
    #[error("expected a permutation vector, got a {rows}x{cols} matrix")]
    ExpectedVector {
        /// Argument row count
        rows: usize,
        /// Argument column count
        cols: usize,
    },

    /// A permutation entry was fractional, negative, or out of range
    #[error("invalid permutation entry {value} (must be an integer in [0, {bound}))")]
    InvalidPermutation {
        /// Offending entry, rendered for display
        value: String,
        /// Exclusive index bound
        bound: usize,
    },

    /// Operation not defined for this element kind
    #[error("unsupported kind {kind} for operation '{op}'")]
    UnsupportedKind {
        /// The unsupported kind
        kind: NumericKind,
        /// The operation name
        op: &'static str,
    },

    /// The allocator reported failure
    #[error("allocation failed: {call} of {size} bytes")]
    AllocationFailed {
        /// Which allocator entry point failed
        call: AllocCall,
        /// Requested size in bytes
        size: usize,
    },
}

impl Error {
    /// Create a kind mismatch error
    pub fn kind_mismatch(lhs: NumericKind, rhs: NumericKind) -> Self {
        Self::KindMismatch { lhs, rhs }
    }

    /// Create a shape mismatch error from two (rows, cols) pairs
    pub fn shape_mismatch(lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::ShapeMismatch { lhs, rhs }
    }
}
