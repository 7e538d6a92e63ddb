//! Transfer-function lookup tables.
//!
//! Decoding integer pixels is a table lookup: a [`Lut`] holds the linear
//! value of every 8-bit and every 16-bit code. Encoding linear floats goes
//! through a table of 4096 intervals over [0, 1] with linear interpolation;
//! values outside [0, 1] fall back to the exact function.
//!
//! The standard tables are built on first use and shared:
//!
//! ```rust
//! use ofxs_color::Lut;
//!
//! let srgb = Lut::srgb();
//! assert_eq!(srgb.to_linear_u8(255), 1.0);
//! assert_eq!(srgb.from_linear_u8(srgb.to_linear_u8(128)), 128);
//! ```

use std::fmt;
use std::sync::OnceLock;

use ofxs_core::{Error, PixelComponents, Result};
use tracing::debug;

use crate::transfer::{rec709, srgb};

/// Intervals of the linear-to-encoded table.
const ENCODE_INTERVALS: usize = 4096;

/// Precomputed tables for one transfer function.
pub struct Lut {
    name: &'static str,
    to_linear: fn(f32) -> f32,
    from_linear: fn(f32) -> f32,
    from_u8: Box<[f32]>,
    from_u16: Box<[f32]>,
    encode: Box<[f32]>,
}

impl Lut {
    /// Builds the tables for a decode / encode function pair.
    pub fn new(name: &'static str, to_linear: fn(f32) -> f32, from_linear: fn(f32) -> f32) -> Self {
        debug!(name, "building transfer lut");
        let from_u8 = (0..=u8::MAX as u32)
            .map(|i| to_linear(i as f32 / 255.0))
            .collect();
        let from_u16 = (0..=u16::MAX as u32)
            .map(|i| to_linear(i as f32 / 65535.0))
            .collect();
        let encode = (0..=ENCODE_INTERVALS)
            .map(|i| from_linear(i as f32 / ENCODE_INTERVALS as f32))
            .collect();
        Self {
            name,
            to_linear,
            from_linear,
            from_u8,
            from_u16,
            encode,
        }
    }

    /// Shared sRGB tables.
    pub fn srgb() -> &'static Lut {
        static SRGB: OnceLock<Lut> = OnceLock::new();
        SRGB.get_or_init(|| Lut::new("sRGB", srgb::eotf, srgb::oetf))
    }

    /// Shared Rec.709 tables.
    pub fn rec709() -> &'static Lut {
        static REC709: OnceLock<Lut> = OnceLock::new();
        REC709.get_or_init(|| Lut::new("Rec.709", rec709::eotf, rec709::oetf))
    }

    /// Name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes an 8-bit code.
    #[inline]
    pub fn to_linear_u8(&self, v: u8) -> f32 {
        self.from_u8[v as usize]
    }

    /// Decodes a 16-bit code.
    #[inline]
    pub fn to_linear_u16(&self, v: u16) -> f32 {
        self.from_u16[v as usize]
    }

    /// Decodes a float with the exact function.
    #[inline]
    pub fn to_linear_float(&self, v: f32) -> f32 {
        (self.to_linear)(v)
    }

    /// Encodes a linear float with the exact function.
    #[inline]
    pub fn from_linear_float(&self, l: f32) -> f32 {
        (self.from_linear)(l)
    }

    /// Encodes a linear float through the interpolated table.
    #[inline]
    pub fn from_linear_float_fast(&self, l: f32) -> f32 {
        // Also routes NaN to the exact function.
        if !(0.0..=1.0).contains(&l) {
            return (self.from_linear)(l);
        }
        let x = l * ENCODE_INTERVALS as f32;
        let i = (x as usize).min(ENCODE_INTERVALS - 1);
        let t = x - i as f32;
        let (a, b) = (self.encode[i], self.encode[i + 1]);
        a + (b - a) * t
    }

    /// Encodes a linear float to an 8-bit code, clamping.
    #[inline]
    pub fn from_linear_u8(&self, l: f32) -> u8 {
        unit_to_u8(self.from_linear_float_fast(l))
    }

    /// Encodes a linear float to a 16-bit code, clamping.
    #[inline]
    pub fn from_linear_u16(&self, l: f32) -> u16 {
        (self.from_linear_float_fast(l).clamp(0.0, 1.0) * 65535.0 + 0.5) as u16
    }

    /// Decodes interleaved 8-bit pixels to linear floats.
    ///
    /// Alpha is scaled to [0, 1] without the transfer function: the fourth
    /// channel of RGBA and the only channel of Alpha images.
    ///
    /// # Errors
    ///
    /// A format error for layouts other than Alpha, RGB and RGBA; a shape
    /// error if the slices differ in length or are not whole pixels.
    pub fn to_linear_f32_from_u8(
        &self,
        src: &[u8],
        dst: &mut [f32],
        components: PixelComponents,
    ) -> Result<()> {
        let n = check_rows(src.len(), dst.len(), components)?;
        for (s, d) in src.chunks_exact(n).zip(dst.chunks_exact_mut(n)) {
            for (k, (&v, out)) in s.iter().zip(d.iter_mut()).enumerate() {
                *out = if is_alpha(components, k) {
                    v as f32 / 255.0
                } else {
                    self.to_linear_u8(v)
                };
            }
        }
        Ok(())
    }

    /// Encodes interleaved linear floats to 8-bit pixels.
    ///
    /// Alpha is clamped and scaled without the transfer function.
    ///
    /// # Errors
    ///
    /// Same as [`to_linear_f32_from_u8`](Self::to_linear_f32_from_u8).
    pub fn from_linear_f32_to_u8(
        &self,
        src: &[f32],
        dst: &mut [u8],
        components: PixelComponents,
    ) -> Result<()> {
        let n = check_rows(src.len(), dst.len(), components)?;
        for (s, d) in src.chunks_exact(n).zip(dst.chunks_exact_mut(n)) {
            for (k, (&v, out)) in s.iter().zip(d.iter_mut()).enumerate() {
                *out = if is_alpha(components, k) {
                    unit_to_u8(v)
                } else {
                    self.from_linear_u8(v)
                };
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lut").field("name", &self.name).finish_non_exhaustive()
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[inline]
fn is_alpha(components: PixelComponents, channel: usize) -> bool {
    match components {
        PixelComponents::Alpha => true,
        PixelComponents::Rgba => channel == 3,
        _ => false,
    }
}

/// Returns the channel count after checking the two buffers match.
fn check_rows(src_len: usize, dst_len: usize, components: PixelComponents) -> Result<usize> {
    let n = match components {
        PixelComponents::Alpha | PixelComponents::Rgb | PixelComponents::Rgba => components.count(),
        other => return Err(Error::unsupported_format(format!("{other} pixels"))),
    };
    if src_len % n != 0 {
        return Err(Error::BufferTooSmall {
            len: src_len,
            required: src_len.next_multiple_of(n),
        });
    }
    if dst_len < src_len {
        return Err(Error::BufferTooSmall {
            len: dst_len,
            required: src_len,
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_u8_roundtrip() {
        for lut in [Lut::srgb(), Lut::rec709()] {
            for v in 0..=255u8 {
                assert_eq!(lut.from_linear_u8(lut.to_linear_u8(v)), v, "{} code {v}", lut.name());
            }
        }
    }

    #[test]
    fn test_u16_roundtrip_within_one_code() {
        let lut = Lut::srgb();
        for v in (0..=u16::MAX).step_by(97) {
            let back = lut.from_linear_u16(lut.to_linear_u16(v));
            assert!((back as i32 - v as i32).abs() <= 1, "code {v} came back as {back}");
        }
        assert_eq!(lut.from_linear_u16(1.0), u16::MAX);
    }

    #[test]
    fn test_fast_encode_matches_exact() {
        let lut = Lut::srgb();
        for i in 0..=1000 {
            let l = i as f32 / 1000.0;
            assert_abs_diff_eq!(lut.from_linear_float_fast(l), lut.from_linear_float(l), epsilon = 5e-5);
        }
    }

    #[test]
    fn test_out_of_range_uses_exact_function() {
        let lut = Lut::srgb();
        assert_eq!(lut.from_linear_float_fast(2.0), srgb::oetf(2.0));
        assert_eq!(lut.from_linear_float_fast(-0.1), srgb::oetf(-0.1));
        assert_eq!(lut.from_linear_u8(2.0), 255);
        assert_eq!(lut.from_linear_u8(-1.0), 0);
    }

    #[test]
    fn test_decode_tables_match_functions() {
        let lut = Lut::rec709();
        assert_eq!(lut.to_linear_u8(0), 0.0);
        assert_eq!(lut.to_linear_u8(51), rec709::eotf(51.0 / 255.0));
        assert_eq!(lut.to_linear_u16(40000), rec709::eotf(40000.0 / 65535.0));
        assert_eq!(lut.to_linear_float(0.5), rec709::eotf(0.5));
    }

    #[test]
    fn test_shared_instance() {
        assert!(std::ptr::eq(Lut::srgb(), Lut::srgb()));
        assert_eq!(Lut::rec709().name(), "Rec.709");
    }

    #[test]
    fn test_batch_preserves_alpha() {
        let lut = Lut::srgb();
        let src = [128u8, 64, 255, 128];
        let mut linear = [0.0f32; 4];
        lut.to_linear_f32_from_u8(&src, &mut linear, PixelComponents::Rgba).unwrap();
        assert_eq!(linear[0], lut.to_linear_u8(128));
        assert_abs_diff_eq!(linear[3], 128.0 / 255.0);

        let mut back = [0u8; 4];
        lut.from_linear_f32_to_u8(&linear, &mut back, PixelComponents::Rgba).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_batch_alpha_only() {
        let lut = Lut::srgb();
        let mut out = [0.0f32; 2];
        lut.to_linear_f32_from_u8(&[0, 51], &mut out, PixelComponents::Alpha).unwrap();
        assert_abs_diff_eq!(out[1], 0.2);
    }

    #[test]
    fn test_batch_shape_errors() {
        let lut = Lut::srgb();
        let mut out = [0.0f32; 3];
        let err = lut.to_linear_f32_from_u8(&[0; 4], &mut out, PixelComponents::Rgb).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { len: 4, required: 6 }));

        let err = lut.to_linear_f32_from_u8(&[0; 6], &mut out, PixelComponents::Rgb).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { len: 3, required: 6 }));

        let err = lut
            .to_linear_f32_from_u8(&[0; 2], &mut out, PixelComponents::Custom(2))
            .unwrap_err();
        assert!(err.is_format_error());
    }
}
