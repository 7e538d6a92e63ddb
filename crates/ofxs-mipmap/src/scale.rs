//! Host-facing entry points.
//!
//! These take the host's runtime-tagged buffers, check the pixel format and
//! pick the typed specialization. Only 32-bit float pixels laid out as
//! Alpha, RGB or RGBA are rendered; everything else is rejected before any
//! pixel is touched.

use ofxs_core::{
    BitDepth, Error, ImageMemoryAllocator, PixelComponents, PixelDestination, PixelSource,
    PixelValue, RectI, Result, RoiHalving,
};

use crate::context::MipMapContext;
use crate::level::build_mip_map_level;
use crate::pyramid::{MipMap, build_mip_maps_for_components};

fn is_supported(components: PixelComponents, depth: BitDepth) -> bool {
    depth == <f32 as PixelValue>::DEPTH
        && matches!(
            components,
            PixelComponents::Alpha | PixelComponents::Rgb | PixelComponents::Rgba
        )
}

fn check_source(src: &PixelSource<'_>) -> Result<()> {
    if !is_supported(src.components, src.depth()) {
        return Err(Error::unsupported_format(format!(
            "{} {} source",
            src.components,
            src.depth()
        )));
    }
    Ok(())
}

fn check_formats(src: &PixelSource<'_>, dst: &PixelDestination<'_>) -> Result<()> {
    if !is_supported(dst.components, dst.depth()) {
        return Err(Error::unsupported_format(format!(
            "{} {} destination",
            dst.components,
            dst.depth()
        )));
    }
    if src.components != dst.components || src.depth() != dst.depth() {
        return Err(Error::format_mismatch(
            format!("{} {}", src.components, src.depth()),
            format!("{} {}", dst.components, dst.depth()),
        ));
    }
    Ok(())
}

/// Renders pyramid level `levels` of `src` into `original_render_window` of
/// `dst`.
///
/// `render_window` is the full-resolution window the level is derived from.
/// With `levels == 0` the window is copied unchanged.
///
/// # Errors
///
/// - A format error if either image is not float Alpha/RGB/RGBA, or if the
///   two formats differ. `dst` is not written.
/// - A shape error if a buffer, stride or window is inconsistent.
/// - An allocation error if scratch memory is refused.
///
/// # Example
///
/// ```rust
/// use ofxs_core::{PixelComponents, PixelData, PixelDataMut, PixelDestination, PixelSource, RectI};
/// use ofxs_mipmap::{MipMapContext, scale_pixel_data};
///
/// let full = RectI::new(0, 0, 4, 4);
/// let half = RectI::new(0, 0, 2, 2);
/// let pixels = vec![0.5f32; 16 * 4];
/// let mut out = vec![0.0f32; 4 * 4];
///
/// let src = PixelSource {
///     data: PixelData::Float(&pixels),
///     components: PixelComponents::Rgba,
///     bounds: full,
///     row_bytes: 4 * 4 * 4,
/// };
/// let mut dst = PixelDestination {
///     data: PixelDataMut::Float(&mut out),
///     components: PixelComponents::Rgba,
///     bounds: half,
///     row_bytes: 2 * 4 * 4,
/// };
///
/// scale_pixel_data(&MipMapContext::new(), half, full, 1, &src, &mut dst).unwrap();
/// assert!(out.iter().all(|&v| v == 0.5));
/// ```
pub fn scale_pixel_data<A, R>(
    ctx: &MipMapContext<A, R>,
    original_render_window: RectI,
    render_window: RectI,
    levels: u32,
    src: &PixelSource<'_>,
    dst: &mut PixelDestination<'_>,
) -> Result<()>
where
    A: ImageMemoryAllocator,
    R: RoiHalving,
{
    check_formats(src, dst)?;
    let components = dst.components;
    let src_view = src.float_view()?;
    let mut dst_view = dst.float_view_mut()?;

    match components {
        PixelComponents::Rgba => build_mip_map_level::<f32, 4, A, R>(
            ctx,
            original_render_window,
            render_window,
            levels,
            &src_view,
            &mut dst_view,
        ),
        PixelComponents::Rgb => build_mip_map_level::<f32, 3, A, R>(
            ctx,
            original_render_window,
            render_window,
            levels,
            &src_view,
            &mut dst_view,
        ),
        PixelComponents::Alpha => build_mip_map_level::<f32, 1, A, R>(
            ctx,
            original_render_window,
            render_window,
            levels,
            &src_view,
            &mut dst_view,
        ),
        other => Err(Error::unsupported_format(format!("{other} destination"))),
    }
}

/// Builds levels `1..=max_level` of `src` over `render_window` into
/// `mipmaps`, which must hold exactly `max_level` slots.
///
/// # Errors
///
/// - A format error if `src` is not float Alpha/RGB/RGBA. `mipmaps` is not
///   touched.
/// - [`Error::LevelCountMismatch`] if the slot count differs from
///   `max_level`.
/// - An allocation error if a level buffer is refused.
pub fn build_mip_maps<A, R>(
    ctx: &MipMapContext<A, R>,
    render_window: RectI,
    src: &PixelSource<'_>,
    max_level: u32,
    mipmaps: &mut [MipMap],
) -> Result<()>
where
    A: ImageMemoryAllocator,
    R: RoiHalving,
{
    check_source(src)?;
    let src_view = src.float_view()?;

    match src.components {
        PixelComponents::Rgba => {
            build_mip_maps_for_components::<f32, 4, A, R>(ctx, render_window, &src_view, max_level, mipmaps)
        }
        PixelComponents::Rgb => {
            build_mip_maps_for_components::<f32, 3, A, R>(ctx, render_window, &src_view, max_level, mipmaps)
        }
        PixelComponents::Alpha => {
            build_mip_maps_for_components::<f32, 1, A, R>(ctx, render_window, &src_view, max_level, mipmaps)
        }
        other => Err(Error::unsupported_format(format!("{other} source"))),
    }
}
