//! Core Matrix type: buffer ownership, lifecycle, and element access

use super::StorageOrder;
use crate::alloc::AllocRef;
use crate::error::{AllocCall, Error, Result};
use crate::kind::{Element, Lifecycle, NumericKind};
use crate::value::{self, Value};
use std::ptr::{self, NonNull};

/// Runtime-typed dense matrix
///
/// A `Matrix` owns one flat byte buffer holding `rows * cols` slots of its
/// element kind, laid out in either storage order. The kind and order are
/// fixed at construction; dimensions change only by constructing a new
/// matrix. The allocator the buffer came from travels with the matrix and
/// frees it on drop.
///
/// For owning kinds every slot holds a constructed element at all times
/// after a successful constructor returns; drop destroys each slot exactly
/// once before releasing the buffer.
pub struct Matrix {
    buf: NonNull<u8>,
    rows: usize,
    cols: usize,
    kind: NumericKind,
    order: StorageOrder,
    alloc: AllocRef,
}

impl Matrix {
    /// Allocate a zeroed buffer and wrap it, without constructing owning
    /// slots. Owning slots start as null handles, which `Drop` skips, so a
    /// partially filled matrix is always safe to drop.
    pub(crate) fn alloc_raw(
        alloc: &AllocRef,
        rows: usize,
        cols: usize,
        kind: NumericKind,
        order: StorageOrder,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize { rows, cols });
        }
        let stride = kind.stride();
        let count = rows
            .checked_mul(cols)
            .ok_or(Error::CapacityOverflow { rows, cols, stride })?;
        let size = count
            .checked_mul(stride)
            .ok_or(Error::CapacityOverflow { rows, cols, stride })?;

        let buf = alloc
            .zero_allocate(count, stride, kind.align())
            .ok_or(Error::AllocationFailed {
                call: AllocCall::ZeroAlloc,
                size,
            })?;

        Ok(Self {
            buf,
            rows,
            cols,
            kind,
            order,
            alloc: alloc.clone(),
        })
    }

    /// Flat construction: a zero-filled matrix of a trivial kind
    ///
    /// Zeroed bytes are only a valid element for trivial kinds; owning
    /// kinds return `UnsupportedKind` and must go through [`Matrix::new`].
    pub fn zeroed(
        alloc: &AllocRef,
        rows: usize,
        cols: usize,
        kind: NumericKind,
        order: StorageOrder,
    ) -> Result<Self> {
        if kind.is_owning() {
            return Err(Error::UnsupportedKind { kind, op: "zeroed" });
        }
        Self::alloc_raw(alloc, rows, cols, kind, order)
    }

    /// Constructing construction: every slot holds the kind's zero value
    ///
    /// For owning kinds each slot is constructed individually. If
    /// constructing slot `i` fails, slots `0..i` are destroyed, the buffer
    /// is freed, and the error propagates; no partially initialized matrix
    /// is ever returned.
    pub fn new(
        alloc: &AllocRef,
        rows: usize,
        cols: usize,
        kind: NumericKind,
        order: StorageOrder,
    ) -> Result<Self> {
        let out = Self::alloc_raw(alloc, rows, cols, kind, order)?;
        if kind.is_owning() {
            let stride = kind.stride();
            for i in 0..out.elem_count() {
                // On failure `out` drops here: constructed slots 0..i are
                // destroyed and the buffer is released through `alloc`.
                unsafe { value::construct_zero(kind, out.buf.as_ptr().add(i * stride), alloc)? };
            }
        }
        Ok(out)
    }

    /// Build a matrix from a row-major slice of trivial elements
    pub fn from_slice<T: Element>(
        alloc: &AllocRef,
        data: &[T],
        rows: usize,
        cols: usize,
        order: StorageOrder,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(Error::shape_mismatch((rows, cols), (1, data.len())));
        }
        let mut out = Self::zeroed(alloc, rows, cols, T::KIND, order)?;
        for r in 0..rows {
            for c in 0..cols {
                out.write_elem(data[r * cols + c], r, c);
            }
        }
        Ok(out)
    }

    /// Build a matrix from a row-major list of values of any one kind
    pub fn from_values(
        alloc: &AllocRef,
        values: Vec<Value>,
        rows: usize,
        cols: usize,
        kind: NumericKind,
        order: StorageOrder,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize { rows, cols });
        }
        if values.len() != rows * cols {
            return Err(Error::shape_mismatch((rows, cols), (1, values.len())));
        }
        let mut out = Self::alloc_raw(alloc, rows, cols, kind, order)?;
        for (i, v) in values.into_iter().enumerate() {
            let (r, c) = (i / cols, i % cols);
            unsafe { value::write_slot(kind, out.slot_mut(r, c), v)? };
        }
        Ok(out)
    }

    /// Deep copy through this matrix's allocator
    pub fn try_clone(&self) -> Result<Self> {
        let mut out = Self::alloc_raw(&self.alloc, self.rows, self.cols, self.kind, self.order)?;
        match self.kind.lifecycle() {
            Lifecycle::Trivial => unsafe {
                ptr::copy_nonoverlapping(self.buf.as_ptr(), out.buf.as_ptr(), self.byte_len());
            },
            Lifecycle::Owning => {
                for r in 0..self.rows {
                    for c in 0..self.cols {
                        let v = unsafe { value::read_slot(self.kind, self.slot(r, c))? };
                        unsafe { value::write_slot(self.kind, out.slot_mut(r, c), v)? };
                    }
                }
            }
        }
        Ok(out)
    }

    // ===== Accessors =====

    /// Row count
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element kind
    #[inline]
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Storage order
    #[inline]
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// The allocator this matrix's buffer came from
    #[inline]
    pub fn allocator(&self) -> &AllocRef {
        &self.alloc
    }

    /// Total number of element slots
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Buffer length in bytes (always `rows * cols * stride(kind)`)
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.elem_count() * self.kind.stride()
    }

    /// Whether this is a 1x1 matrix, usable as a broadcast scalar
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Whether this is a 1xN or Nx1 matrix
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    // ===== Element access =====

    #[inline]
    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Byte address of slot (row, col); callers guarantee bounds.
    #[inline]
    pub(crate) fn slot(&self, row: usize, col: usize) -> *const u8 {
        debug_assert!(row < self.rows && col < self.cols);
        let idx = self.order.linear(row, col, self.rows, self.cols);
        unsafe { self.buf.as_ptr().add(idx * self.kind.stride()) }
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, row: usize, col: usize) -> *mut u8 {
        self.slot(row, col) as *mut u8
    }

    /// Unchecked typed read; callers guarantee kind and bounds.
    #[inline]
    pub(crate) fn read_elem<T: Element>(&self, row: usize, col: usize) -> T {
        debug_assert_eq!(T::KIND, self.kind);
        unsafe { ptr::read(self.slot(row, col) as *const T) }
    }

    /// Unchecked typed write; callers guarantee kind and bounds.
    #[inline]
    pub(crate) fn write_elem<T: Element>(&mut self, v: T, row: usize, col: usize) {
        debug_assert_eq!(T::KIND, self.kind);
        unsafe { ptr::write(self.slot_mut(row, col) as *mut T, v) };
    }

    /// Bounds- and kind-checked typed element read
    pub fn get<T: Element>(&self, row: usize, col: usize) -> Result<T> {
        if T::KIND != self.kind {
            return Err(Error::kind_mismatch(self.kind, T::KIND));
        }
        self.check_index(row, col)?;
        Ok(self.read_elem(row, col))
    }

    /// Bounds- and kind-checked typed element write
    pub fn set<T: Element>(&mut self, v: T, row: usize, col: usize) -> Result<()> {
        if T::KIND != self.kind {
            return Err(Error::kind_mismatch(self.kind, T::KIND));
        }
        self.check_index(row, col)?;
        self.write_elem(v, row, col);
        Ok(())
    }

    /// Kind-erased element read (deep copy for owning kinds)
    pub fn get_value(&self, row: usize, col: usize) -> Result<Value> {
        self.check_index(row, col)?;
        unsafe { value::read_slot(self.kind, self.slot(row, col)) }
    }

    /// Kind-erased element write; the value's kind must match the matrix's
    pub fn set_value(&mut self, v: Value, row: usize, col: usize) -> Result<()> {
        self.check_index(row, col)?;
        unsafe { value::write_slot(self.kind, self.slot_mut(row, col), v) }
    }

    /// Fill every slot with the same trivial element
    pub fn fill<T: Element>(&mut self, v: T) -> Result<()> {
        if T::KIND != self.kind {
            return Err(Error::kind_mismatch(self.kind, T::KIND));
        }
        for r in 0..self.rows {
            for c in 0..self.cols {
                self.write_elem(v, r, c);
            }
        }
        Ok(())
    }
}

impl Drop for Matrix {
    fn drop(&mut self) {
        if self.kind.is_owning() {
            let stride = self.kind.stride();
            for i in 0..self.elem_count() {
                unsafe { value::destroy_slot(self.kind, self.buf.as_ptr().add(i * stride)) };
            }
        }
        unsafe {
            self.alloc
                .deallocate(self.buf, self.byte_len(), self.kind.align())
        };
    }
}

impl PartialEq for Matrix {
    /// Logical elementwise equality, independent of storage order
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        for r in 0..self.rows {
            for c in 0..self.cols {
                if !unsafe { value::eq_slots(self.kind, self.slot(r, c), other.slot(r, c)) } {
                    return false;
                }
            }
        }
        true
    }
}
