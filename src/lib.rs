//! # matr
//!
//! **Runtime-typed dense matrix engine.**
//!
//! matr provides a single [`Matrix`](matrix::Matrix) value type that can
//! hold any of a closed set of numeric element kinds - fixed-width scalars,
//! complex numbers, arbitrary-precision integers and rationals, symbolic
//! expressions, even matrices of matrices - behind one address-computation
//! and dispatch mechanism.
//!
//! ## Features
//!
//! - **Runtime kinds**: One matrix type over 17 element kinds, from `u8` to
//!   symbolic expressions, selected at runtime
//! - **Two storage orders**: Row-major and column-major buffers with
//!   identical logical semantics; operands of different orders mix freely
//! - **Broadcasting arithmetic**: Elementwise add/sub/mul/div, allocating
//!   and in-place, with 1x1 scalar broadcast
//! - **Matrix multiplication**: Accumulated in the element kind's own
//!   representation
//! - **Permutation selection**: Validated integer gather over rows and
//!   columns
//! - **Pluggable allocation**: Every buffer goes through an injected
//!   [`Allocator`](alloc::Allocator)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use matr::prelude::*;
//!
//! let alloc = matr::alloc::system();
//! let a = Matrix::from_slice(&alloc, &[1.0, 2.0, 3.0, 4.0], 2, 2, StorageOrder::RowMajor)?;
//! let b = Matrix::from_slice(&alloc, &[5.0, 6.0, 7.0, 8.0], 2, 2, StorageOrder::RowMajor)?;
//!
//! let c = matr::ops::add(&alloc, &a, &b)?;
//! let d = matr::ops::matmul(&alloc, &a, &b)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alloc;
pub mod error;
pub mod kind;
pub mod matrix;
pub mod ops;
pub mod value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::alloc::{AllocRef, Allocator};
    pub use crate::error::{Error, Result};
    pub use crate::kind::{Element, NumericKind};
    pub use crate::matrix::{Matrix, StorageOrder};
    pub use crate::value::Value;
}
