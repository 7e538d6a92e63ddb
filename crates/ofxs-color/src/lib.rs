//! # ofxs-color
//!
//! Color helpers for OFX image effects.
//!
//! - [`colorspace`] - Per-pixel conversions between RGB and HSV, HSL, HSI,
//!   Y'CbCr, Y'PbPr, Y'UV, CIE XYZ and L*a*b*
//! - [`transfer`] - sRGB, Rec.709 and gamma encode/decode curves
//! - [`Lut`] - Lookup tables for fast integer decode and float encode
//!
//! # Usage
//!
//! ```rust
//! use ofxs_color::colorspace::{rgb709_to_lab, rgb_to_hsv};
//! use ofxs_color::transfer::srgb;
//!
//! let display = [0.8_f32, 0.4, 0.2];
//! let linear = display.map(srgb::eotf);
//! let lab = rgb709_to_lab(linear);
//! let hsv = rgb_to_hsv(display);
//! assert!(lab[0] > 0.0 && hsv[1] > 0.0);
//! ```

#![warn(missing_docs)]

pub mod colorspace;
pub mod lut;
pub mod transfer;

pub use colorspace::HUE_CIRCLE;
pub use lut::Lut;
