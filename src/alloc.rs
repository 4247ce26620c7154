//! Pluggable memory allocation for matrix buffers
//!
//! Every matrix carries an [`AllocRef`] and routes all buffer allocation,
//! resizing, and deallocation through it. There is no global allocator state
//! in the engine; the allocator a matrix was built with is the one that
//! frees it.

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::Arc;

/// Memory allocator for matrix buffers
///
/// All entry points report failure by returning `None`, which the engine
/// maps to [`crate::error::Error::AllocationFailed`].
pub trait Allocator: Send + Sync {
    /// Allocate `size` bytes with the given alignment
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    /// Allocate `count * stride` bytes of zeroed memory
    fn zero_allocate(&self, count: usize, stride: usize, align: usize) -> Option<NonNull<u8>>;

    /// Resize an allocation previously made through this allocator
    ///
    /// # Safety
    /// `ptr` must have been returned by this allocator with the given
    /// `old_size` and `align`, and must not be used after a successful call.
    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Free an allocation previously made through this allocator
    ///
    /// # Safety
    /// `ptr` must have been returned by this allocator with the given
    /// `size` and `align`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize);
}

/// Shared allocator handle carried by every matrix
pub type AllocRef = Arc<dyn Allocator>;

/// Allocator backed by `std::alloc`
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(size, align).ok()?;
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    fn zero_allocate(&self, count: usize, stride: usize, align: usize) -> Option<NonNull<u8>> {
        let size = count.checked_mul(stride)?;
        let layout = Layout::from_size_align(size, align).ok()?;
        NonNull::new(unsafe { std::alloc::alloc_zeroed(layout) })
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(old_size, align).ok()?;
        NonNull::new(std::alloc::realloc(ptr.as_ptr(), layout, new_size))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let layout = Layout::from_size_align_unchecked(size, align);
        std::alloc::dealloc(ptr.as_ptr(), layout);
    }
}

/// Convenience constructor for the default system-backed [`AllocRef`]
pub fn system() -> AllocRef {
    Arc::new(SystemAllocator)
}
