//! Rec.709 (BT.709) transfer function.
//!
//! [`eotf`] is the exact inverse of the camera OETF, not the BT.1886
//! display curve.
//!
//! # Reference
//!
//! ITU-R BT.709-6

/// Rec.709 OETF: encodes linear to Rec.709.
///
/// # Formula
///
/// ```text
/// if L < 0.018:
///     V = 4.5 * L
/// else:
///     V = 1.099 * L^0.45 - 0.099
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l < 0.018 {
        4.5 * l
    } else {
        1.099 * l.powf(0.45) - 0.099
    }
}

/// Inverse Rec.709 OETF: decodes Rec.709 to linear.
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v < 0.081 {
        v / 4.5
    } else {
        ((v + 0.099) / 1.099).powf(1.0 / 0.45)
    }
}
