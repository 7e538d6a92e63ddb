//! Full pyramid build.
//!
//! Builds levels `1..=max_level` in one pass, each level halved from the
//! previous one and kept in its own buffer. Level `L` of the pyramid is
//! bit-identical to what [`build_mip_map_level`](crate::build_mip_map_level)
//! produces for level `L` of the same window.

use std::mem::size_of;

use ofxs_core::{
    Error, ImageMemory, ImageMemoryAllocator, ImageView, ImageViewMut, PixelValue, RectI, Result,
    RoiHalving,
};
use tracing::{debug, warn};

use crate::context::MipMapContext;
use crate::halve::halve_window;

/// One level of a pyramid.
///
/// A slot is empty until the builder fills it. Filled slots own their
/// buffer, which is released when the slot is dropped or overwritten.
#[derive(Debug)]
pub struct MipMap<P = f32> {
    /// Window covered by the level, in level coordinates.
    pub bounds: RectI,
    /// Elements between consecutive rows.
    pub row_stride: usize,
    /// Channels per pixel.
    pub components: usize,
    /// Pixel buffer, `None` until built.
    pub data: Option<ImageMemory<P>>,
}

impl<P> Default for MipMap<P> {
    fn default() -> Self {
        Self {
            bounds: RectI::default(),
            row_stride: 0,
            components: 0,
            data: None,
        }
    }
}

impl<P: PixelValue> MipMap<P> {
    /// Returns `true` once the level has a buffer.
    pub fn is_built(&self) -> bool {
        self.data.is_some()
    }

    /// Read-only view of the level.
    ///
    /// Fails with [`Error::BufferTooSmall`] if the level was never built.
    pub fn view(&self) -> Result<ImageView<'_, P>> {
        let pixels = self.data.as_ref().map(ImageMemory::pixels).unwrap_or_default();
        ImageView::new(pixels, self.bounds, self.row_stride, self.components)
    }
}

/// An owned pyramid: slot `i` holds level `i + 1`.
///
/// Dereferences to a slice of [`MipMap`], which is what the builders fill.
#[derive(Debug)]
pub struct MipMapSet<P = f32> {
    levels: Vec<MipMap<P>>,
}

impl<P: PixelValue> MipMapSet<P> {
    /// Creates `max_level` empty slots.
    pub fn with_levels(max_level: u32) -> Self {
        Self {
            levels: (0..max_level).map(|_| MipMap::default()).collect(),
        }
    }

    /// Level `level`, counted from 1.
    pub fn level(&self, level: u32) -> Option<&MipMap<P>> {
        level.checked_sub(1).and_then(|i| self.levels.get(i as usize))
    }

    /// Total bytes held by built levels.
    pub fn n_bytes(&self) -> usize {
        self.levels
            .iter()
            .filter_map(|m| m.data.as_ref())
            .map(ImageMemory::n_bytes)
            .sum()
    }
}

impl<P> std::ops::Deref for MipMapSet<P> {
    type Target = [MipMap<P>];

    fn deref(&self) -> &[MipMap<P>] {
        &self.levels
    }
}

impl<P> std::ops::DerefMut for MipMapSet<P> {
    fn deref_mut(&mut self) -> &mut [MipMap<P>] {
        &mut self.levels
    }
}

/// Builds levels `1..=max_level` of `src` over `render_window`.
///
/// `mipmaps` must have exactly `max_level` slots; slot `i` receives level
/// `i + 1`. `max_level == 0` leaves the (empty) container untouched.
///
/// # Errors
///
/// - [`Error::LevelCountMismatch`] if the slot count differs from
///   `max_level`. Nothing is written.
/// - [`Error::AllocationFailed`] if a level buffer cannot be obtained. The
///   levels built so far stay in place; the set as a whole should be
///   discarded.
pub fn build_mip_maps_for_components<P, const N: usize, A, R>(
    ctx: &MipMapContext<A, R>,
    render_window: RectI,
    src: &ImageView<'_, P>,
    max_level: u32,
    mipmaps: &mut [MipMap<P>],
) -> Result<()>
where
    P: PixelValue,
    A: ImageMemoryAllocator,
    R: RoiHalving,
{
    if mipmaps.len() != max_level as usize {
        return Err(Error::LevelCountMismatch {
            expected: max_level as usize,
            got: mipmaps.len(),
        });
    }
    debug!(window = %render_window, max_level, components = N, "build_mip_maps");

    let mut next_window = render_window;
    for i in 0..mipmaps.len() {
        let level = i as u32 + 1;
        next_window = ctx.roi().downscale(next_window, 1);
        debug_assert_eq!(
            next_window,
            ctx.roi().downscale(render_window, level),
            "RoI halving does not compose at level {level}"
        );

        let row_stride = next_window.width() * N;
        let len = row_stride * next_window.height();
        let mut memory = ctx
            .allocator()
            .allocate::<P>(len * size_of::<P>())
            .inspect_err(|e| warn!(level, error = %e, "mipmap allocation failed"))?;

        {
            let source = match i {
                0 => *src,
                _ => mipmaps[i - 1].view()?,
            };
            let mut target =
                ImageViewMut::new(&mut memory.pixels_mut()[..len], next_window, row_stride, N)?;
            halve_window::<P, N>(next_window, &source, &mut target);
        }

        mipmaps[i] = MipMap {
            bounds: next_window,
            row_stride,
            components: N,
            data: Some(memory),
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofxs_core::HeapAllocator;

    #[test]
    fn test_level_windows_follow_halving() {
        let bounds = RectI::new(-3, 1, 20, 12);
        let data = vec![0.5f32; bounds.area() * 3];
        let src = ImageView::new(&data, bounds, bounds.width() * 3, 3).unwrap();
        let ctx = MipMapContext::new();
        let mut set = MipMapSet::<f32>::with_levels(4);
        build_mip_maps_for_components::<f32, 3, _, _>(&ctx, bounds, &src, 4, &mut set).unwrap();

        for level in 1..=4 {
            let m = set.level(level).unwrap();
            assert!(m.is_built());
            assert_eq!(m.bounds, bounds.downscale_power_of_two_smallest_enclosing(level));
            assert!(m.view().unwrap().data().iter().all(|&v| v == 0.5));
        }
        assert!(set.level(0).is_none());
        assert!(set.level(5).is_none());
        assert_eq!(set.n_bytes(), ctx.allocator().live_bytes());
    }

    #[test]
    fn test_slot_count_must_match() {
        let bounds = RectI::new(0, 0, 4, 4);
        let data = vec![1.0f32; 16];
        let src = ImageView::new(&data, bounds, 4, 1).unwrap();
        let ctx = MipMapContext::new();
        let mut set = MipMapSet::<f32>::with_levels(3);
        let err =
            build_mip_maps_for_components::<f32, 1, _, _>(&ctx, bounds, &src, 2, &mut set).unwrap_err();
        assert!(matches!(err, Error::LevelCountMismatch { expected: 2, got: 3 }));
        assert!(set.iter().all(|m| !m.is_built()));
    }

    #[test]
    fn test_zero_levels_is_noop() {
        let bounds = RectI::new(0, 0, 4, 4);
        let data = vec![1.0f32; 16];
        let src = ImageView::new(&data, bounds, 4, 1).unwrap();
        let ctx = MipMapContext::new();
        let mut set = MipMapSet::<f32>::with_levels(0);
        build_mip_maps_for_components::<f32, 1, _, _>(&ctx, bounds, &src, 0, &mut set).unwrap();
        assert!(set.is_empty());
        assert_eq!(ctx.allocator().allocation_count(), 0);
    }

    #[test]
    fn test_allocation_failure_keeps_built_levels() {
        let bounds = RectI::new(0, 0, 8, 8);
        let data = vec![1.0f32; 64];
        let src = ImageView::new(&data, bounds, 8, 1).unwrap();
        // Level 1 takes 64 bytes, level 2 another 16.
        let ctx = MipMapContext::with_allocator(HeapAllocator::with_budget(70));
        let mut set = MipMapSet::<f32>::with_levels(2);
        let err =
            build_mip_maps_for_components::<f32, 1, _, _>(&ctx, bounds, &src, 2, &mut set).unwrap_err();
        assert!(err.is_allocation_error());
        assert!(set[0].is_built());
        assert!(!set[1].is_built());
        drop(set);
        assert_eq!(ctx.allocator().live_bytes(), 0);
    }

    #[test]
    fn test_unbuilt_view_fails() {
        let m = MipMap::<f32> {
            bounds: RectI::new(0, 0, 2, 2),
            row_stride: 2,
            components: 1,
            data: None,
        };
        assert!(matches!(m.view(), Err(Error::BufferTooSmall { len: 0, required: 4 })));
    }
}
