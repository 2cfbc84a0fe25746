use std::alloc::Layout;
use std::ptr::NonNull;

/// Where tree nodes get their memory from.
///
/// Same idea as a memory source for an allocator, just scoped down to fixed-size node blocks.
/// Returning `None` from [`NodeSource::allocate`] makes the insertion that asked for the node fail
/// cleanly instead of aborting the process.
pub trait NodeSource {
    /// Returns a block fitting `layout` (size and alignment), or `None` if no memory is available.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// SAFETY: `ptr` must have been returned by `self.allocate(layout)` and not deallocated since.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// Nodes come from the global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalSource;

impl NodeSource for GlobalSource {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None // nodes are never zero sized
        }
        // SAFETY: `layout` has a non-zero size.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: guaranteed by caller, the block came from `std::alloc::alloc` with this layout.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

impl<S: NodeSource + ?Sized> NodeSource for &S {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded from caller
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// Hands out at most `limit` blocks from the global allocator, then reports exhaustion.
#[cfg(test)]
pub(crate) struct BoundedSource {
    remaining: std::cell::Cell<usize>,
    live: std::cell::Cell<usize>,
}

#[cfg(test)]
impl BoundedSource {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            remaining: std::cell::Cell::new(limit),
            live: std::cell::Cell::new(0)
        }
    }

    pub(crate) fn refill(&self, extra: usize) {
        self.remaining.set(self.remaining.get() + extra);
    }

    /// Blocks currently handed out and not yet returned.
    pub(crate) fn live(&self) -> usize {
        self.live.get()
    }
}

#[cfg(test)]
impl NodeSource for BoundedSource {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let remaining = self.remaining.get();
        if remaining == 0 { return None }
        let block = GlobalSource.allocate(layout)?;
        self.remaining.set(remaining - 1);
        self.live.set(self.live.get() + 1);
        Some(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        // SAFETY: every block we hand out came from `GlobalSource`.
        unsafe { GlobalSource.deallocate(ptr, layout) }
    }
}
