//! Storage order: the two dense layout conventions
//!
//! A matrix buffer is one flat block of `rows * cols` slots; the storage
//! order decides whether consecutive slots advance across columns first
//! (row-major) or rows first (column-major). Logical semantics of every
//! operation are identical under both.

/// Storage layout of a matrix buffer
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageOrder {
    /// Consecutive slots advance across a row
    #[default]
    RowMajor,
    /// Consecutive slots advance down a column
    ColMajor,
}

impl StorageOrder {
    /// Linear slot index of element (row, col) in a rows x cols buffer
    #[inline]
    pub const fn linear(self, row: usize, col: usize, rows: usize, cols: usize) -> usize {
        match self {
            Self::RowMajor => row * cols + col,
            Self::ColMajor => col * rows + row,
        }
    }
}
