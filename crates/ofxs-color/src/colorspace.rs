//! Per-pixel colorspace formulas.
//!
//! Every function maps one triplet to another. RGB values are nominally in
//! [0, 1] but nothing is clamped, so out-of-gamut and HDR values pass
//! through the linear formulas unchanged.
//!
//! Hue is expressed as a fraction of [`HUE_CIRCLE`]: red is `0`, green
//! `1/3`, blue `2/3`.
//!
//! # Families
//!
//! - HSV, HSL, HSI
//! - Y'CbCr video range (BT.601, BT.709)
//! - Y'PbPr analog (BT.601, BT.709, BT.2020)
//! - Y'UV (BT.601, BT.709)
//! - CIE XYZ from Rec.709, Rec.2020, ACES AP0 and AP1 primaries
//! - CIE L*a*b*
//!
//! # Example
//!
//! ```rust
//! use ofxs_color::colorspace::{hsv_to_rgb, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv([0.0, 1.0, 0.0]);
//! assert!((hsv[0] - 1.0 / 3.0).abs() < 1e-6);
//! assert_eq!(hsv_to_rgb(hsv), [0.0, 1.0, 0.0]);
//! ```

use std::f32::consts::PI;

use glam::{Mat3, Vec3};

/// Length of the hue axis.
pub const HUE_CIRCLE: f32 = 1.0;

/// Builds a matrix from rows, so constants read like the published tables.
const fn from_rows(m: [[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(m[0][0], m[1][0], m[2][0]),
        Vec3::new(m[0][1], m[1][1], m[2][1]),
        Vec3::new(m[0][2], m[1][2], m[2][2]),
    )
}

#[inline]
fn apply(m: &Mat3, v: [f32; 3]) -> [f32; 3] {
    (*m * Vec3::from_array(v)).to_array()
}

// ============================================================================
// Hue-based models
// ============================================================================

/// Hue of an RGB triplet given its max and chroma, on [`HUE_CIRCLE`].
#[inline]
fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let h = sector * (HUE_CIRCLE / 6.0);
    if h < 0.0 { h + HUE_CIRCLE } else { h }
}

/// Splits a hue into a sector in `0..6` and the fraction within it.
#[inline]
fn hue_sector(h: f32) -> (i32, f32) {
    let h = h * (6.0 / HUE_CIRCLE);
    let i = h.floor();
    ((i as i32).rem_euclid(6), h - i)
}

#[inline]
fn from_sector(i: i32, v: f32, t: f32, p: f32, q: f32) -> [f32; 3] {
    match i {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// RGB to HSV.
///
/// Hue and saturation are `0` for greys and for black.
pub fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let delta = max - min;
    if max == 0.0 {
        return [0.0, 0.0, max];
    }
    [hue(r, g, b, max, delta), delta / max, max]
}

/// HSV to RGB.
///
/// The hue wraps around the circle, negative hues included.
pub fn hsv_to_rgb([h, s, v]: [f32; 3]) -> [f32; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let (i, f) = hue_sector(h);
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    from_sector(i, v, t, p, q)
}

/// RGB to HSL.
pub fn rgb_to_hsl([r, g, b]: [f32; 3]) -> [f32; 3] {
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let l = (min + max) / 2.0;
    let delta = max - min;
    if max == 0.0 {
        return [0.0, 0.0, l];
    }
    let s = if delta == 0.0 {
        0.0
    } else if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    [hue(r, g, b, max, delta), s, l]
}

/// HSL to RGB.
pub fn hsl_to_rgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let (i, f) = hue_sector(h);
    let v = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = l + l - v;
    let sv = (v - p) / v;
    let vsf = v * sv * f;
    from_sector(i, v, p + vsf, p, v - vsf)
}

/// RGB to HSI.
pub fn rgb_to_hsi([r, g, b]: [f32; 3]) -> [f32; 3] {
    let m = r.min(g).min(b);
    let num = 0.5 * ((r - g) + (r - b));
    let den = ((r - g) * (r - g) + (r - b) * (g - b)).max(0.0).sqrt();
    // Greys give 0/0; NaN fails the comparison below and maps to hue 0.
    let theta = (num / den).acos() * (HUE_CIRCLE / 2.0) / PI;
    let sum = r + g + b;

    let h = if theta > 0.0 {
        if b <= g { theta } else { HUE_CIRCLE - theta }
    } else {
        0.0
    };
    let s = if sum > 0.0 { 1.0 - 3.0 / sum * m } else { 0.0 };
    [h, s, sum / 3.0]
}

/// HSI to RGB.
pub fn hsi_to_rgb([h, s, i]: [f32; 3]) -> [f32; 3] {
    let a = i * (1.0 - s);
    let peak = |h: f32| {
        let scale = PI / (HUE_CIRCLE / 2.0);
        i * (1.0 + s * (h * scale).cos() / ((HUE_CIRCLE / 6.0 - h) * scale).cos())
    };

    if h < HUE_CIRCLE / 3.0 {
        let r = peak(h);
        [r, 3.0 * i - (r + a), a]
    } else if h < HUE_CIRCLE * 2.0 / 3.0 {
        let g = peak(h - HUE_CIRCLE / 3.0);
        [a, g, 3.0 * i - (a + g)]
    } else {
        let b = peak(h - HUE_CIRCLE * 2.0 / 3.0);
        [3.0 * i - (a + b), a, b]
    }
}

// ============================================================================
// Luma / chroma models
// ============================================================================

const VIDEO_BLACK: f32 = 16.0 / 255.0;
const VIDEO_MID: f32 = 128.0 / 255.0;

/// R'G'B' in [0, 1] to video-range Y'CbCr, BT.601.
///
/// Y' spans 16/255 to 235/255, Cb and Cr 16/255 to 240/255.
pub fn rgb_to_ycbcr601([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.257 * r + 0.504 * g + 0.098 * b + VIDEO_BLACK,
        -0.148 * r - 0.291 * g + 0.439 * b + VIDEO_MID,
        0.439 * r - 0.368 * g - 0.071 * b + VIDEO_MID,
    ]
}

/// Video-range Y'CbCr to R'G'B', BT.601.
pub fn ycbcr601_to_rgb([y, cb, cr]: [f32; 3]) -> [f32; 3] {
    let (y, cb, cr) = (y - VIDEO_BLACK, cb - VIDEO_MID, cr - VIDEO_MID);
    [
        1.164 * y + 1.596 * cr,
        1.164 * y - 0.813 * cr - 0.392 * cb,
        1.164 * y + 2.017 * cb,
    ]
}

/// R'G'B' in [0, 1] to video-range Y'CbCr, BT.709.
pub fn rgb_to_ycbcr709([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.183 * r + 0.614 * g + 0.062 * b + VIDEO_BLACK,
        -0.101 * r - 0.339 * g + 0.439 * b + VIDEO_MID,
        0.439 * r - 0.399 * g - 0.040 * b + VIDEO_MID,
    ]
}

/// Video-range Y'CbCr to R'G'B', BT.709.
pub fn ycbcr709_to_rgb([y, cb, cr]: [f32; 3]) -> [f32; 3] {
    let (y, cb, cr) = (y - VIDEO_BLACK, cb - VIDEO_MID, cr - VIDEO_MID);
    [
        1.164 * y + 1.793 * cr,
        1.164 * y - 0.533 * cr - 0.213 * cb,
        1.164 * y + 2.112 * cb,
    ]
}

/// R'G'B' to analog Y'PbPr, BT.601. Pb and Pr span -0.5 to 0.5.
pub fn rgb_to_ypbpr601([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.299 * r + 0.587 * g + 0.114 * b,
        -0.168736 * r - 0.331264 * g + 0.500 * b,
        0.500 * r - 0.418688 * g - 0.081312 * b,
    ]
}

/// Analog Y'PbPr to R'G'B', BT.601.
pub fn ypbpr601_to_rgb([y, pb, pr]: [f32; 3]) -> [f32; 3] {
    [
        y + 1.402 * pr,
        y - 0.344136 * pb - 0.714136 * pr,
        y + 1.772 * pb,
    ]
}

/// Luma weights and chroma scales of a Y'PbPr system.
struct LumaCoefficients {
    kr: f32,
    kg: f32,
    kb: f32,
    pb_scale: f32,
    pr_scale: f32,
}

const BT709: LumaCoefficients = LumaCoefficients {
    kr: 0.2126390058,
    kg: 0.7151686783,
    kb: 0.07219231534,
    pb_scale: 1.8556,
    pr_scale: 1.5748,
};

const BT2020: LumaCoefficients = LumaCoefficients {
    kr: 0.2627002119,
    kg: 0.6779980711,
    kb: 0.0593017165,
    pb_scale: 1.8814,
    pr_scale: 1.4746,
};

impl LumaCoefficients {
    #[inline]
    fn encode(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let y = self.kr * r + self.kg * g + self.kb * b;
        [y, (b - y) / self.pb_scale, (r - y) / self.pr_scale]
    }

    #[inline]
    fn decode(&self, [y, pb, pr]: [f32; 3]) -> [f32; 3] {
        let b = pb * self.pb_scale + y;
        let r = pr * self.pr_scale + y;
        let g = (y - self.kr * r - self.kb * b) / self.kg;
        [r, g, b]
    }
}

/// R'G'B' to analog Y'PbPr, BT.709.
pub fn rgb_to_ypbpr709(rgb: [f32; 3]) -> [f32; 3] {
    BT709.encode(rgb)
}

/// Analog Y'PbPr to R'G'B', BT.709.
pub fn ypbpr709_to_rgb(ypbpr: [f32; 3]) -> [f32; 3] {
    BT709.decode(ypbpr)
}

/// R'G'B' to analog Y'PbPr, BT.2020 (non-constant luminance).
pub fn rgb_to_ypbpr2020(rgb: [f32; 3]) -> [f32; 3] {
    BT2020.encode(rgb)
}

/// Analog Y'PbPr to R'G'B', BT.2020.
pub fn ypbpr2020_to_rgb(ypbpr: [f32; 3]) -> [f32; 3] {
    BT2020.decode(ypbpr)
}

/// R'G'B' to Y'UV, BT.601. U spans +-0.436, V +-0.615.
pub fn rgb_to_yuv601([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.299 * r + 0.587 * g + 0.114 * b,
        -0.14713 * r - 0.28886 * g + 0.436 * b,
        0.615 * r - 0.51499 * g - 0.10001 * b,
    ]
}

/// Y'UV to R'G'B', BT.601.
pub fn yuv601_to_rgb([y, u, v]: [f32; 3]) -> [f32; 3] {
    [
        y + 1.13983 * v,
        y - 0.39465 * u - 0.58060 * v,
        y + 2.03211 * u,
    ]
}

/// R'G'B' to Y'UV, BT.709.
pub fn rgb_to_yuv709([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.2126 * r + 0.7152 * g + 0.0722 * b,
        -0.09991 * r - 0.33609 * g + 0.436 * b,
        0.615 * r - 0.55861 * g - 0.05639 * b,
    ]
}

/// Y'UV to R'G'B', BT.709.
pub fn yuv709_to_rgb([y, u, v]: [f32; 3]) -> [f32; 3] {
    [
        y + 1.28033 * v,
        y - 0.21482 * u - 0.38059 * v,
        y + 2.12798 * u,
    ]
}

// ============================================================================
// CIE XYZ
// ============================================================================

/// Linear Rec.709 to XYZ, D65.
pub const RGB709_TO_XYZ: Mat3 = from_rows([
    [0.4123907992, 0.3575843394, 0.1804807884],
    [0.2126390058, 0.7151686783, 0.07219231534],
    [0.0193308187, 0.1191947798, 0.9505321522],
]);

/// XYZ to linear Rec.709, D65.
pub const XYZ_TO_RGB709: Mat3 = from_rows([
    [3.2409699419, -1.5373831776, -0.4986107603],
    [-0.9692436363, 1.8759675015, 0.0415550574],
    [0.0556300797, -0.2039769589, 1.0569715142],
]);

/// Linear Rec.2020 to XYZ, D65.
pub const RGB2020_TO_XYZ: Mat3 = from_rows([
    [0.6369580481, 0.1446169036, 0.1688809752],
    [0.2627002119, 0.6779980711, 0.0593017165],
    [0.0000000000, 0.0280726931, 1.060985058],
]);

/// XYZ to linear Rec.2020, D65.
pub const XYZ_TO_RGB2020: Mat3 = from_rows([
    [1.7166511880, -0.3556707838, -0.2533662814],
    [-0.6666843518, 1.6164812366, 0.0157685458],
    [0.0176398574, -0.0427706133, 0.9421031212],
]);

/// ACES AP0 to XYZ.
pub const ACES_AP0_TO_XYZ: Mat3 = from_rows([
    [0.9525523959, 0.0000000000, 0.0000936786],
    [0.3439664498, 0.7281660966, -0.0721325464],
    [0.0000000000, 0.0000000000, 1.0088251844],
]);

/// XYZ to ACES AP0.
pub const XYZ_TO_ACES_AP0: Mat3 = from_rows([
    [1.0498110175, 0.0000000000, -0.0000974845],
    [-0.4959030231, 1.3733130458, 0.0982400361],
    [0.0000000000, 0.0000000000, 0.9912520182],
]);

/// ACES AP1 to XYZ.
pub const ACES_AP1_TO_XYZ: Mat3 = from_rows([
    [0.6624541811, 0.1340042065, 0.1561876870],
    [0.2722287168, 0.6740817658, 0.0536895174],
    [-0.0055746495, 0.0040607335, 1.0103391003],
]);

/// XYZ to ACES AP1.
pub const XYZ_TO_ACES_AP1: Mat3 = from_rows([
    [1.6410233797, -0.3248032942, -0.2364246952],
    [-0.6636628587, 1.6153315917, 0.0167563477],
    [0.0117218943, -0.0082844420, 0.9883948585],
]);

/// Linear Rec.709 to XYZ.
pub fn rgb709_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    apply(&RGB709_TO_XYZ, rgb)
}

/// XYZ to linear Rec.709.
pub fn xyz_to_rgb709(xyz: [f32; 3]) -> [f32; 3] {
    apply(&XYZ_TO_RGB709, xyz)
}

/// Linear Rec.2020 to XYZ.
pub fn rgb2020_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    apply(&RGB2020_TO_XYZ, rgb)
}

/// XYZ to linear Rec.2020.
pub fn xyz_to_rgb2020(xyz: [f32; 3]) -> [f32; 3] {
    apply(&XYZ_TO_RGB2020, xyz)
}

/// ACES AP0 (ACES2065-1) to XYZ.
pub fn rgb_aces_ap0_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    apply(&ACES_AP0_TO_XYZ, rgb)
}

/// XYZ to ACES AP0.
pub fn xyz_to_rgb_aces_ap0(xyz: [f32; 3]) -> [f32; 3] {
    apply(&XYZ_TO_ACES_AP0, xyz)
}

/// ACES AP1 (ACEScg) to XYZ.
pub fn rgb_aces_ap1_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    apply(&ACES_AP1_TO_XYZ, rgb)
}

/// XYZ to ACES AP1.
pub fn xyz_to_rgb_aces_ap1(xyz: [f32; 3]) -> [f32; 3] {
    apply(&XYZ_TO_ACES_AP1, xyz)
}

// ============================================================================
// CIE L*a*b*
// ============================================================================

/// Reference white used for L*a*b*.
const LAB_WHITE: [f32; 3] = [
    0.412453 + 0.357580 + 0.180423,
    0.212671 + 0.715160 + 0.072169,
    0.019334 + 0.119193 + 0.950227,
];

#[inline]
fn labf(x: f32) -> f32 {
    if x >= 0.008856 {
        x.powf(1.0 / 3.0)
    } else {
        7.787 * x + 16.0 / 116.0
    }
}

#[inline]
fn labfi(x: f32) -> f32 {
    if x >= 0.206893 {
        x * x * x
    } else {
        (x - 16.0 / 116.0) / 7.787
    }
}

/// XYZ to L*a*b*. L* spans 0 to 100 for in-gamut colors.
pub fn xyz_to_lab([x, y, z]: [f32; 3]) -> [f32; 3] {
    let fx = labf(x / LAB_WHITE[0]);
    let fy = labf(y / LAB_WHITE[1]);
    let fz = labf(z / LAB_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// L*a*b* to XYZ.
pub fn lab_to_xyz([l, a, b]: [f32; 3]) -> [f32; 3] {
    let cy = (l + 16.0) / 116.0;
    let cx = a / 500.0 + cy;
    let cz = cy - b / 200.0;
    [
        LAB_WHITE[0] * labfi(cx),
        LAB_WHITE[1] * labfi(cy),
        LAB_WHITE[2] * labfi(cz),
    ]
}

/// Linear Rec.709 to L*a*b*.
pub fn rgb709_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    xyz_to_lab(rgb709_to_xyz(rgb))
}

/// L*a*b* to linear Rec.709.
pub fn lab_to_rgb709(lab: [f32; 3]) -> [f32; 3] {
    xyz_to_rgb709(lab_to_xyz(lab))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SAMPLES: [[f32; 3]; 6] = [
        [0.8, 0.2, 0.1],
        [0.1, 0.7, 0.3],
        [0.2, 0.3, 0.9],
        [0.5, 0.5, 0.5],
        [0.9, 0.85, 0.1],
        [0.05, 0.02, 0.4],
    ];

    fn assert_triplet(a: [f32; 3], b: [f32; 3], epsilon: f32) {
        for k in 0..3 {
            assert_abs_diff_eq!(a[k], b[k], epsilon = epsilon);
        }
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(rgb_to_hsv([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0]);
        assert_triplet(rgb_to_hsv([0.0, 0.0, 1.0]), [2.0 / 3.0, 1.0, 1.0], 1e-6);
        assert_eq!(rgb_to_hsv([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(rgb_to_hsv([0.4, 0.4, 0.4]), [0.0, 0.0, 0.4]);
        // Magenta sits below zero before wrapping
        assert_triplet(rgb_to_hsv([1.0, 0.0, 1.0]), [5.0 / 6.0, 1.0, 1.0], 1e-6);
    }

    #[test]
    fn test_hsv_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, 1e-5);
        }
    }

    #[test]
    fn test_hue_wraps() {
        let a = hsv_to_rgb([0.25, 0.5, 0.8]);
        assert_triplet(hsv_to_rgb([1.25, 0.5, 0.8]), a, 1e-5);
        assert_triplet(hsv_to_rgb([-0.75, 0.5, 0.8]), a, 1e-5);
    }

    #[test]
    fn test_hsl_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, 1e-5);
        }
        assert_eq!(rgb_to_hsl([0.5, 0.5, 0.5]), [0.0, 0.0, 0.5]);
        assert_triplet(rgb_to_hsl([1.0, 0.0, 0.0]), [0.0, 1.0, 0.5], 1e-6);
    }

    #[test]
    fn test_hsi_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(hsi_to_rgb(rgb_to_hsi(rgb)), rgb, 1e-4);
        }
    }

    #[test]
    fn test_hsi_grey() {
        let hsi = rgb_to_hsi([0.3, 0.3, 0.3]);
        assert_eq!(hsi[0], 0.0);
        assert_abs_diff_eq!(hsi[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hsi[2], 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_ycbcr_video_range() {
        assert_triplet(rgb_to_ycbcr601([0.0; 3]), [16.0 / 255.0, 0.5019608, 0.5019608], 1e-6);
        assert_triplet(rgb_to_ycbcr709([1.0; 3]), [235.0 / 255.0, 0.5019608, 0.5019608], 2e-3);
        for rgb in SAMPLES {
            assert_triplet(ycbcr601_to_rgb(rgb_to_ycbcr601(rgb)), rgb, 5e-3);
            assert_triplet(ycbcr709_to_rgb(rgb_to_ycbcr709(rgb)), rgb, 5e-3);
        }
    }

    #[test]
    fn test_ypbpr_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(ypbpr601_to_rgb(rgb_to_ypbpr601(rgb)), rgb, 1e-4);
            assert_triplet(ypbpr709_to_rgb(rgb_to_ypbpr709(rgb)), rgb, 1e-5);
            assert_triplet(ypbpr2020_to_rgb(rgb_to_ypbpr2020(rgb)), rgb, 1e-5);
        }
        let white = rgb_to_ypbpr709([1.0; 3]);
        assert_triplet(white, [1.0, 0.0, 0.0], 1e-6);
    }

    #[test]
    fn test_yuv_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(yuv601_to_rgb(rgb_to_yuv601(rgb)), rgb, 1e-3);
            assert_triplet(yuv709_to_rgb(rgb_to_yuv709(rgb)), rgb, 1e-3);
        }
    }

    #[test]
    fn test_xyz_white_point() {
        let xyz = rgb709_to_xyz([1.0; 3]);
        assert_triplet(xyz, [0.95047, 1.0, 1.08883], 1e-3);
        let xyz = rgb2020_to_xyz([1.0; 3]);
        assert_triplet(xyz, [0.95047, 1.0, 1.08883], 1e-3);
    }

    #[test]
    fn test_xyz_roundtrip() {
        for rgb in SAMPLES {
            assert_triplet(xyz_to_rgb709(rgb709_to_xyz(rgb)), rgb, 1e-5);
            assert_triplet(xyz_to_rgb2020(rgb2020_to_xyz(rgb)), rgb, 1e-5);
            assert_triplet(xyz_to_rgb_aces_ap0(rgb_aces_ap0_to_xyz(rgb)), rgb, 1e-5);
            assert_triplet(xyz_to_rgb_aces_ap1(rgb_aces_ap1_to_xyz(rgb)), rgb, 1e-5);
        }
    }

    #[test]
    fn test_matrix_layout_is_row_major() {
        // Red maps to the first column of the table.
        assert_triplet(rgb709_to_xyz([1.0, 0.0, 0.0]), [0.4123908, 0.2126390, 0.0193308], 1e-7);
    }

    #[test]
    fn test_lab() {
        let lab = rgb709_to_lab([1.0; 3]);
        assert_abs_diff_eq!(lab[0], 100.0, epsilon = 0.01);
        assert_abs_diff_eq!(lab[1], 0.0, epsilon = 0.2);
        assert_abs_diff_eq!(lab[2], 0.0, epsilon = 0.2);
        assert_triplet(xyz_to_lab([0.0; 3]), [0.0, 0.0, 0.0], 1e-5);

        for rgb in SAMPLES {
            assert_triplet(lab_to_rgb709(rgb709_to_lab(rgb)), rgb, 1e-3);
        }
    }
}
