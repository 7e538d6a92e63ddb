//! Scoped image memory.
//!
//! Plugins do not allocate pixel buffers behind the host's back: scratch
//! and output images are requested from an allocation service by byte size
//! and handed back when the handle goes away. [`ImageMemoryAllocator`] is
//! that service, [`ImageMemory`] the handle. Dropping the handle releases
//! the memory on every path, including early returns on error.
//!
//! [`HeapAllocator`] is the default service. It allocates from the global
//! heap with fallible reservation and can enforce a byte budget, which is
//! how hosts usually cap plugin memory:
//!
//! ```rust
//! use ofxs_core::{HeapAllocator, ImageMemoryAllocator};
//!
//! let alloc = HeapAllocator::with_budget(1024);
//! let a = alloc.allocate::<f32>(768).unwrap();
//! assert_eq!(a.len(), 192);
//! assert!(alloc.allocate::<f32>(512).unwrap_err().is_allocation_error());
//! drop(a);
//! assert_eq!(alloc.live_bytes(), 0);
//! assert!(alloc.allocate::<f32>(512).is_ok());
//! ```

use std::fmt;
use std::mem::size_of;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::pixel::PixelValue;

/// The image memory allocation service.
pub trait ImageMemoryAllocator {
    /// Allocates a zeroed buffer of at least `n_bytes` bytes.
    fn allocate<P: PixelValue>(&self, n_bytes: usize) -> Result<ImageMemory<P>>;
}

impl<A: ImageMemoryAllocator> ImageMemoryAllocator for &A {
    #[inline]
    fn allocate<P: PixelValue>(&self, n_bytes: usize) -> Result<ImageMemory<P>> {
        (**self).allocate(n_bytes)
    }
}

/// Shared bookkeeping between an allocator and its live buffers.
#[derive(Debug, Default)]
struct Ledger {
    budget: Option<usize>,
    live: AtomicUsize,
    allocations: AtomicUsize,
}

impl Ledger {
    fn reserve(&self, n_bytes: usize) -> Result<()> {
        let Some(budget) = self.budget else {
            self.live.fetch_add(n_bytes, Ordering::Relaxed);
            return Ok(());
        };
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                live.checked_add(n_bytes).filter(|&total| total <= budget)
            })
            .map(|_| ())
            .map_err(|live| {
                Error::allocation_failed(
                    n_bytes,
                    format!("budget of {budget} bytes exceeded, {live} bytes in use"),
                )
            })
    }

    fn release(&self, n_bytes: usize) {
        self.live.fetch_sub(n_bytes, Ordering::AcqRel);
    }
}

/// Scoped, owned image buffer.
///
/// The buffer is zero-initialized. Its element count is the requested byte
/// size rounded up to whole elements.
pub struct ImageMemory<P> {
    data: Vec<P>,
    n_bytes: usize,
    ledger: Option<Arc<Ledger>>,
}

impl<P: PixelValue> ImageMemory<P> {
    /// Wraps an existing vector, for allocators that manage their own storage.
    pub fn from_vec(data: Vec<P>) -> Self {
        let n_bytes = data.len() * size_of::<P>();
        Self {
            data,
            n_bytes,
            ledger: None,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes accounted for this buffer.
    #[inline]
    pub fn n_bytes(&self) -> usize {
        self.n_bytes
    }

    /// Read access to the elements.
    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    /// Write access to the elements.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.data
    }
}

impl<P> Drop for ImageMemory<P> {
    fn drop(&mut self) {
        if let Some(ledger) = &self.ledger {
            ledger.release(self.n_bytes);
        }
    }
}

impl<P> fmt::Debug for ImageMemory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageMemory")
            .field("len", &self.data.len())
            .field("n_bytes", &self.n_bytes)
            .finish()
    }
}

/// Heap-backed [`ImageMemoryAllocator`] with an optional byte budget.
///
/// Clones share the same budget and counters.
#[derive(Debug, Clone, Default)]
pub struct HeapAllocator {
    ledger: Arc<Ledger>,
}

impl HeapAllocator {
    /// Creates an allocator without a budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator refusing to keep more than `budget` bytes live.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            ledger: Arc::new(Ledger {
                budget: Some(budget),
                ..Ledger::default()
            }),
        }
    }

    /// Byte budget, if any.
    pub fn budget(&self) -> Option<usize> {
        self.ledger.budget
    }

    /// Bytes currently held by live buffers.
    pub fn live_bytes(&self) -> usize {
        self.ledger.live.load(Ordering::Acquire)
    }

    /// Number of successful allocations so far.
    pub fn allocation_count(&self) -> usize {
        self.ledger.allocations.load(Ordering::Acquire)
    }
}

impl ImageMemoryAllocator for HeapAllocator {
    fn allocate<P: PixelValue>(&self, n_bytes: usize) -> Result<ImageMemory<P>> {
        let len = n_bytes.div_ceil(size_of::<P>());
        let n_bytes = len * size_of::<P>();
        self.ledger.reserve(n_bytes)?;

        let mut data: Vec<P> = Vec::new();
        if let Err(e) = data.try_reserve_exact(len) {
            self.ledger.release(n_bytes);
            return Err(Error::allocation_failed(n_bytes, e.to_string()));
        }
        data.resize(len, P::default());

        self.ledger.allocations.fetch_add(1, Ordering::AcqRel);
        let mut memory = ImageMemory::from_vec(data);
        memory.ledger = Some(Arc::clone(&self.ledger));
        Ok(memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_rounds_to_elements() {
        let alloc = HeapAllocator::new();
        let mem = alloc.allocate::<f32>(10).unwrap();
        assert_eq!(mem.len(), 3);
        assert_eq!(mem.n_bytes(), 12);
        assert!(mem.pixels().iter().all(|&v| v == 0.0));
        assert_eq!(alloc.live_bytes(), 12);
    }

    #[test]
    fn test_release_on_drop() {
        let alloc = HeapAllocator::new();
        {
            let _a = alloc.allocate::<u16>(100).unwrap();
            let _b = alloc.allocate::<u8>(50).unwrap();
            assert_eq!(alloc.live_bytes(), 150);
        }
        assert_eq!(alloc.live_bytes(), 0);
        assert_eq!(alloc.allocation_count(), 2);
    }

    #[test]
    fn test_budget_refusal_keeps_accounting() {
        let alloc = HeapAllocator::with_budget(64);
        let _a = alloc.allocate::<f32>(48).unwrap();
        let err = alloc.allocate::<f32>(32).unwrap_err();
        assert!(err.is_allocation_error());
        assert_eq!(alloc.live_bytes(), 48);
        assert_eq!(alloc.allocation_count(), 1);
    }

    #[test]
    fn test_clones_share_budget() {
        let alloc = HeapAllocator::with_budget(16);
        let other = alloc.clone();
        let _a = alloc.allocate::<f32>(16).unwrap();
        assert!(other.allocate::<f32>(4).is_err());
        assert_eq!(other.budget(), Some(16));
    }

    #[test]
    fn test_from_vec_is_unaccounted() {
        let mut mem = ImageMemory::from_vec(vec![1.0f32; 8]);
        mem.pixels_mut()[3] = 2.0;
        assert_eq!(mem.n_bytes(), 32);
        assert_eq!(mem.pixels()[3], 2.0);
    }

    #[test]
    fn test_allocator_by_reference() {
        fn alloc_via<A: ImageMemoryAllocator>(a: A) -> ImageMemory<f32> {
            a.allocate(8).unwrap()
        }
        let alloc = HeapAllocator::new();
        let mem = alloc_via(&alloc);
        assert_eq!(mem.len(), 2);
        assert_eq!(alloc.live_bytes(), 8);
    }
}
