//! Pure power-law transfer functions.
//!
//! Negative and zero inputs map to zero.

/// EOTF for arbitrary gamma: `v^gamma`.
///
/// ```rust
/// use ofxs_color::transfer::gamma::gamma_eotf;
///
/// assert!((gamma_eotf(0.5, 2.2) - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`.
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// Gamma 2.2 EOTF.
#[inline]
pub fn gamma22_eotf(v: f32) -> f32 {
    gamma_eotf(v, 2.2)
}

/// Gamma 2.2 OETF.
#[inline]
pub fn gamma22_oetf(l: f32) -> f32 {
    gamma_oetf(l, 2.2)
}

/// Gamma 1.8 EOTF (legacy Apple displays).
#[inline]
pub fn gamma18_eotf(v: f32) -> f32 {
    gamma_eotf(v, 1.8)
}

/// Gamma 1.8 OETF.
#[inline]
pub fn gamma18_oetf(l: f32) -> f32 {
    gamma_oetf(l, 1.8)
}
