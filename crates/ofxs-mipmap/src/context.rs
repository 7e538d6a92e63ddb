//! Services a mipmap build draws on.

use ofxs_core::{HeapAllocator, ImageMemoryAllocator, PowerOfTwoEnclosing, RoiHalving};

/// The plugin-instance services used while building levels.
///
/// Holds the image memory allocator that provides scratch and pyramid
/// buffers, and the RoI halving service that derives each level's window
/// from the previous one. Both are used through shared references only, so
/// one context can serve concurrent renders on different images.
///
/// # Example
///
/// ```rust
/// use ofxs_core::HeapAllocator;
/// use ofxs_mipmap::MipMapContext;
///
/// // 64 MiB of scratch memory per plugin instance
/// let ctx = MipMapContext::with_allocator(HeapAllocator::with_budget(64 << 20));
/// assert_eq!(ctx.allocator().budget(), Some(64 << 20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MipMapContext<A = HeapAllocator, R = PowerOfTwoEnclosing> {
    allocator: A,
    roi: R,
}

impl MipMapContext {
    /// Context with an unbudgeted heap allocator and the standard halving.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: ImageMemoryAllocator> MipMapContext<A> {
    /// Context with a custom allocator and the standard halving.
    pub fn with_allocator(allocator: A) -> Self {
        Self {
            allocator,
            roi: PowerOfTwoEnclosing,
        }
    }
}

impl<A: ImageMemoryAllocator, R: RoiHalving> MipMapContext<A, R> {
    /// Context with custom services.
    pub fn with_services(allocator: A, roi: R) -> Self {
        Self { allocator, roi }
    }

    /// The image memory allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The RoI halving service.
    #[inline]
    pub fn roi(&self) -> &R {
        &self.roi
    }
}
