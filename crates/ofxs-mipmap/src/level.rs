//! Single-level build.
//!
//! Produces one pyramid level directly from the full-resolution source by
//! halving `level` times. Intermediate levels live in scratch buffers
//! obtained from the context's allocator; the last halving writes straight
//! into the caller's destination.
//!
//! At most two scratch buffers are alive at any time: the one being read
//! and the one being written. When a level is done the buffer it was read
//! from is retired and reused for the next level if it is large enough.

use std::mem::size_of;

use ofxs_core::{
    Error, ImageMemory, ImageMemoryAllocator, ImageView, ImageViewMut, PixelValue, RectI, Result,
    RoiHalving,
};
use tracing::{debug, trace, warn};

use crate::context::MipMapContext;
use crate::halve::halve_window;

/// An intermediate level held in scratch memory.
struct Scratch<P> {
    memory: ImageMemory<P>,
    bounds: RectI,
    row_stride: usize,
}

impl<P: PixelValue> Scratch<P> {
    fn view(&self, components: usize) -> Result<ImageView<'_, P>> {
        ImageView::new(self.memory.pixels(), self.bounds, self.row_stride, components)
    }
}

/// Builds pyramid level `level` of `src` into `dst`.
///
/// - `original_render_window` is the window to fill in `dst`, in level
///   coordinates. It must equal `render_window_full_res` halved `level`
///   times by the context's RoI service.
/// - `render_window_full_res` is the level-0 window the pyramid is built
///   from; `src` must cover it.
/// - `level == 0` copies `original_render_window` from `src`.
///
/// Only `original_render_window` of `dst` is written.
///
/// # Errors
///
/// - [`Error::InvalidRegion`] if `dst` does not contain
///   `original_render_window`. Nothing is written.
/// - [`Error::AllocationFailed`] if a scratch buffer cannot be obtained.
///   `dst` is left untouched and every scratch buffer is released.
///
/// # Panics
///
/// In debug builds, if `original_render_window` is not the halved
/// full-resolution window, or if the views do not have `N` channels.
pub fn build_mip_map_level<P, const N: usize, A, R>(
    ctx: &MipMapContext<A, R>,
    original_render_window: RectI,
    render_window_full_res: RectI,
    level: u32,
    src: &ImageView<'_, P>,
    dst: &mut ImageViewMut<'_, P>,
) -> Result<()>
where
    P: PixelValue,
    A: ImageMemoryAllocator,
    R: RoiHalving,
{
    if !original_render_window.is_empty() && !dst.bounds().contains(&original_render_window) {
        return Err(Error::invalid_region(original_render_window, dst.bounds()));
    }
    if level == 0 {
        trace!(window = %original_render_window, "level 0, copying window");
        return dst.copy_window_from(original_render_window, src);
    }

    debug!(
        level,
        full_res = %render_window_full_res,
        window = %original_render_window,
        components = N,
        "build_mip_map_level"
    );

    let mut previous: Option<Scratch<P>> = None;
    let mut spare: Option<ImageMemory<P>> = None;
    let mut next_window = render_window_full_res;

    for i in 1..level {
        next_window = ctx.roi().downscale(next_window, 1);
        debug_assert_eq!(
            next_window,
            ctx.roi().downscale(render_window_full_res, i),
            "RoI halving does not compose at level {i}"
        );

        let row_stride = next_window.width() * N;
        let len = row_stride * next_window.height();
        let mut memory = match spare.take() {
            Some(memory) if memory.len() >= len => {
                debug!(level = i, len, "reusing scratch buffer");
                memory
            }
            retired => {
                // Release the undersized buffer before asking for a new one.
                drop(retired);
                debug!(level = i, len, "allocating scratch buffer");
                ctx.allocator()
                    .allocate::<P>(len * size_of::<P>())
                    .inspect_err(|e| warn!(level = i, error = %e, "scratch allocation failed"))?
            }
        };

        {
            let source = match &previous {
                Some(scratch) => scratch.view(N)?,
                None => *src,
            };
            let mut target =
                ImageViewMut::new(&mut memory.pixels_mut()[..len], next_window, row_stride, N)?;
            halve_window::<P, N>(next_window, &source, &mut target);
        }

        let done = Scratch {
            memory,
            bounds: next_window,
            row_stride,
        };
        spare = previous.replace(done).map(|retired| retired.memory);
    }

    next_window = ctx.roi().downscale(next_window, 1);
    debug_assert_eq!(
        next_window, original_render_window,
        "render window does not match level {level} of the full-resolution window"
    );

    let source = match &previous {
        Some(scratch) => scratch.view(N)?,
        None => *src,
    };
    halve_window::<P, N>(original_render_window, &source, dst);
    Ok(())
}
