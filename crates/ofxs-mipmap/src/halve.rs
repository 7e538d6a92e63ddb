//! Box-halving filter.
//!
//! Downscales one window of a multi-channel image by exactly 2x in each
//! dimension. Destination pixel `(x, y)` is the mean of the 2x2 source block
//! at `(2x, 2y)`:
//!
//! ```text
//!   a b      a = (2x,   2y)    b = (2x+1, 2y)
//!   c d      c = (2x,   2y+1)  d = (2x+1, 2y+1)
//! ```
//!
//! Taps outside the source bounds are dropped from both the sum and the
//! divisor, so the last column or row of an odd-sized source averages 2 (or
//! 1) real pixels instead of being darkened by implicit zero padding.

use ofxs_core::{ImageView, ImageViewMut, PixelValue, RectI};
use tracing::trace;

/// Returns `true` if the 2x expansion of `dst_roi` lies within one pixel of
/// `src_bounds` on every side.
///
/// This is the alignment every halving step needs: each destination pixel
/// keeps at least its first source row and column.
pub fn is_halving_aligned(dst_roi: RectI, src_bounds: RectI) -> bool {
    if dst_roi.is_empty() {
        return true;
    }
    let (x1, y1, x2, y2) = (
        dst_roi.x1 as i64,
        dst_roi.y1 as i64,
        dst_roi.x2 as i64,
        dst_roi.y2 as i64,
    );
    x1 * 2 >= src_bounds.x1 as i64 - 1
        && (x2 - 1) * 2 < src_bounds.x2 as i64
        && y1 * 2 >= src_bounds.y1 as i64 - 1
        && (y2 - 1) * 2 < src_bounds.y2 as i64
}

#[inline]
fn tap<P: PixelValue>(row: Option<&[P]>, offset: Option<usize>) -> P::Accum {
    match (row, offset) {
        (Some(row), Some(i)) => row[i].widen(),
        _ => P::ZERO,
    }
}

/// Fills `dst_roi` of `dst` by halving the matching area of `src`.
///
/// `N` is the channel count of both views. Only pixels inside `dst_roi`
/// are written.
///
/// # Panics
///
/// In debug builds, if `dst_roi` is not halving-aligned with the source
/// bounds (see [`is_halving_aligned`]), if `dst` does not contain `dst_roi`,
/// or if a view does not have `N` channels. These are caller bugs: windows
/// are expected to come from the RoI halving service.
///
/// # Example
///
/// ```rust
/// use ofxs_core::{ImageView, ImageViewMut, RectI};
/// use ofxs_mipmap::halve_window;
///
/// let src_data = [1.0f32, 3.0, 5.0, 7.0];
/// let src = ImageView::new(&src_data, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
/// let mut dst_data = [0.0f32];
/// let mut dst = ImageViewMut::new(&mut dst_data, RectI::new(0, 0, 1, 1), 1, 1).unwrap();
/// halve_window::<f32, 1>(RectI::new(0, 0, 1, 1), &src, &mut dst);
/// assert_eq!(dst_data[0], 4.0);
/// ```
pub fn halve_window<P: PixelValue, const N: usize>(
    dst_roi: RectI,
    src: &ImageView<'_, P>,
    dst: &mut ImageViewMut<'_, P>,
) {
    let src_bounds = src.bounds();
    let dst_bounds = dst.bounds();
    debug_assert!(
        is_halving_aligned(dst_roi, src_bounds),
        "destination window {dst_roi} is not aligned with source bounds {src_bounds}"
    );
    debug_assert!(
        dst_bounds.contains(&dst_roi),
        "destination window {dst_roi} outside destination bounds {dst_bounds}"
    );
    debug_assert_eq!(src.components(), N);
    debug_assert_eq!(dst.components(), N);

    if dst_roi.is_empty() {
        return;
    }
    trace!(roi = %dst_roi, src = %src_bounds, components = N, "halve_window");

    // Taps outside the source bounds are `None`.
    let col_offset = |srcx: i32| {
        (src_bounds.x1 <= srcx && srcx < src_bounds.x2).then(|| (srcx - src_bounds.x1) as usize * N)
    };
    let pick_row = |srcy: i32| (src_bounds.y1 <= srcy && srcy < src_bounds.y2).then(|| src.row(srcy));

    for y in dst_roi.y1..dst_roi.y2 {
        // Destination row y covers source rows 2y (this) and 2y+1 (next).
        let this_row = pick_row(y * 2);
        let next_row = pick_row(y * 2 + 1);
        let sum_h = this_row.is_some() as u32 + next_row.is_some() as u32;
        debug_assert!(sum_h == 1 || sum_h == 2);

        let dst_row = dst.row_mut(y);
        for x in dst_roi.x1..dst_roi.x2 {
            let this_col = col_offset(x * 2);
            let next_col = col_offset(x * 2 + 1);
            let sum_w = this_col.is_some() as u32 + next_col.is_some() as u32;
            debug_assert!(sum_w == 1 || sum_w == 2);
            let count = sum_w * sum_h;

            let out = (x - dst_bounds.x1) as usize * N;
            for k in 0..N {
                let a = tap::<P>(this_row, this_col.map(|o| o + k));
                let b = tap::<P>(this_row, next_col.map(|o| o + k));
                let c = tap::<P>(next_row, this_col.map(|o| o + k));
                let d = tap::<P>(next_row, next_col.map(|o| o + k));
                dst_row[out + k] = P::average(a + b + c + d, count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn halve_owned<const N: usize>(
        src_data: &[f32],
        src_bounds: RectI,
        dst_roi: RectI,
    ) -> Vec<f32> {
        let src = ImageView::new(src_data, src_bounds, src_bounds.width() * N, N).unwrap();
        let mut out = vec![f32::NAN; dst_roi.area() * N];
        let mut dst = ImageViewMut::new(&mut out, dst_roi, dst_roi.width() * N, N).unwrap();
        halve_window::<f32, N>(dst_roi, &src, &mut dst);
        out
    }

    #[test]
    fn test_interior_mean() {
        // 4x2 single channel, both destination pixels fully interior
        let src = [1.0, 2.0, 10.0, 20.0, 3.0, 4.0, 30.0, 40.0];
        let out = halve_owned::<1>(&src, RectI::new(0, 0, 4, 2), RectI::new(0, 0, 2, 1));
        assert_relative_eq!(out[0], 2.5);
        assert_relative_eq!(out[1], 25.0);
    }

    #[test]
    fn test_odd_source_boundary() {
        // 3x3 of 1.0 with 9.0 at (2, 2)
        let mut src = [1.0f32; 9];
        src[2 * 3 + 2] = 9.0;
        let out = halve_owned::<1>(&src, RectI::new(0, 0, 3, 3), RectI::new(0, 0, 2, 2));
        assert_eq!(out[0], 1.0); // (0, 0): four taps
        assert_eq!(out[1], 1.0); // (1, 0): two taps
        assert_eq!(out[2], 1.0); // (0, 1): two taps
        assert_eq!(out[3], 9.0); // (1, 1): single tap
    }

    #[test]
    fn test_odd_lower_bound() {
        // Source starting at x = 1: destination pixel 0 only sees column 1.
        let src = [4.0, 6.0, 8.0, 4.0, 6.0, 8.0];
        let out = halve_owned::<1>(&src, RectI::new(1, 0, 4, 2), RectI::new(0, 0, 2, 1));
        assert_eq!(out[0], 4.0);
        assert_eq!(out[1], 7.0);
    }

    #[test]
    fn test_negative_coordinates() {
        // 2x2 source at (-2, -2) maps to destination pixel (-1, -1).
        let src = [1.0, 2.0, 3.0, 6.0];
        let out = halve_owned::<1>(&src, RectI::new(-2, -2, 0, 0), RectI::new(-1, -1, 0, 0));
        assert_eq!(out, vec![3.0]);
    }

    #[test]
    fn test_rgba_channels_independent() {
        let src: Vec<f32> = (0..4)
            .flat_map(|i| {
                let v = i as f32;
                [v, 10.0 * v, 100.0 * v, 1.0]
            })
            .collect();
        let out = halve_owned::<4>(&src, RectI::new(0, 0, 2, 2), RectI::new(0, 0, 1, 1));
        assert_relative_eq!(out[0], 1.5);
        assert_relative_eq!(out[1], 15.0);
        assert_relative_eq!(out[2], 150.0);
        assert_relative_eq!(out[3], 1.0);
    }

    #[test]
    fn test_writes_only_roi() {
        let src = [2.0f32; 16];
        let src_view = ImageView::new(&src, RectI::new(0, 0, 4, 4), 4, 1).unwrap();
        let mut out = [-1.0f32; 4];
        let mut dst = ImageViewMut::new(&mut out, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
        halve_window::<f32, 1>(RectI::new(1, 0, 2, 2), &src_view, &mut dst);
        assert_eq!(out, [-1.0, 2.0, -1.0, 2.0]);
    }

    #[test]
    fn test_padded_rows() {
        // 2x2 RGB with a padding element per row holding garbage
        let src = [1.0, 2.0, 3.0, 5.0, 6.0, 7.0, 99.0, 3.0, 2.0, 1.0, 7.0, 6.0, 5.0, 99.0];
        let src_view = ImageView::new(&src, RectI::new(0, 0, 2, 2), 7, 3).unwrap();
        let mut out = [0.0f32; 3];
        let mut dst = ImageViewMut::new(&mut out, RectI::new(0, 0, 1, 1), 3, 3).unwrap();
        halve_window::<f32, 3>(RectI::new(0, 0, 1, 1), &src_view, &mut dst);
        assert_eq!(out, [4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_integer_pixels_truncate() {
        let src = [1u8, 2, 2, 2];
        let src_view = ImageView::new(&src, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
        let mut out = [0u8; 1];
        let mut dst = ImageViewMut::new(&mut out, RectI::new(0, 0, 1, 1), 1, 1).unwrap();
        halve_window::<u8, 1>(RectI::new(0, 0, 1, 1), &src_view, &mut dst);
        assert_eq!(out[0], 1);

        let src = [255u8, 255, 255, 255];
        let src_view = ImageView::new(&src, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
        let mut dst = ImageViewMut::new(&mut out, RectI::new(0, 0, 1, 1), 1, 1).unwrap();
        halve_window::<u8, 1>(RectI::new(0, 0, 1, 1), &src_view, &mut dst);
        assert_eq!(out[0], 255);
    }

    #[test]
    fn test_alignment_predicate() {
        let src = RectI::new(0, 0, 3, 3);
        assert!(is_halving_aligned(RectI::new(0, 0, 2, 2), src));
        assert!(!is_halving_aligned(RectI::new(0, 0, 3, 2), src));
        assert!(!is_halving_aligned(RectI::new(-1, 0, 2, 2), src));
        assert!(is_halving_aligned(RectI::new(0, 0, 1, 1), RectI::new(1, 1, 2, 2)));
        assert!(is_halving_aligned(RectI::new(5, 5, 5, 5), src));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not aligned")]
    fn test_misaligned_window_panics_in_debug() {
        let src = [0.0f32; 4];
        let src_view = ImageView::new(&src, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
        let mut out = [0.0f32; 4];
        let mut dst = ImageViewMut::new(&mut out, RectI::new(0, 0, 2, 2), 2, 1).unwrap();
        halve_window::<f32, 1>(RectI::new(0, 0, 2, 2), &src_view, &mut dst);
    }
}
