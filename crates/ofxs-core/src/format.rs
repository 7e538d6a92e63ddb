//! Host pixel format tags.
//!
//! An OFX host hands every image over together with two tags: the
//! component layout and the bit depth of one component. Both are runtime
//! values; the filters pick a typed specialization from them and reject
//! anything they do not implement.
//!
//! # Types
//!
//! - [`PixelComponents`] - Channel layout (Alpha, RGB, RGBA, ...)
//! - [`BitDepth`] - Storage type of one channel
//!
//! # Usage
//!
//! ```rust
//! use ofxs_core::{BitDepth, PixelComponents};
//!
//! assert_eq!(PixelComponents::Rgba.count(), 4);
//! assert_eq!(BitDepth::Float.byte_size(), 4);
//! assert!(BitDepth::Half.is_float());
//! ```

use std::fmt;

/// Channel layout of a host image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelComponents {
    /// No image data.
    #[default]
    None,
    /// Single alpha channel.
    Alpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
    /// Host-specific layout with the given channel count.
    Custom(u8),
}

impl PixelComponents {
    /// Number of interleaved channels per pixel.
    #[inline]
    pub const fn count(&self) -> usize {
        match self {
            PixelComponents::None => 0,
            PixelComponents::Alpha => 1,
            PixelComponents::Rgb => 3,
            PixelComponents::Rgba => 4,
            PixelComponents::Custom(n) => *n as usize,
        }
    }
}

impl fmt::Display for PixelComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelComponents::None => write!(f, "None"),
            PixelComponents::Alpha => write!(f, "Alpha"),
            PixelComponents::Rgb => write!(f, "RGB"),
            PixelComponents::Rgba => write!(f, "RGBA"),
            PixelComponents::Custom(n) => write!(f, "Custom({n})"),
        }
    }
}

/// Storage type of one channel of a host image.
///
/// # Variants
///
/// - `UByte` - 8-bit unsigned [0, 255]
/// - `UShort` - 16-bit unsigned [0, 65535]
/// - `Half` - 16-bit IEEE 754 half float
/// - `Float` - 32-bit IEEE 754 float (the only depth the mipmap code renders)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitDepth {
    /// No image data.
    None,
    /// 8-bit unsigned integer.
    UByte,
    /// 16-bit unsigned integer.
    UShort,
    /// 16-bit half-precision float.
    Half,
    /// 32-bit single-precision float.
    #[default]
    Float,
    /// Host-specific depth.
    Custom,
}

impl BitDepth {
    /// Bytes per channel, `0` when unknown.
    #[inline]
    pub const fn byte_size(&self) -> usize {
        match self {
            BitDepth::UByte => 1,
            BitDepth::UShort | BitDepth::Half => 2,
            BitDepth::Float => 4,
            BitDepth::None | BitDepth::Custom => 0,
        }
    }

    /// Returns `true` for floating-point depths.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, BitDepth::Half | BitDepth::Float)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BitDepth::None => "none",
            BitDepth::UByte => "8-bit",
            BitDepth::UShort => "16-bit",
            BitDepth::Half => "half float",
            BitDepth::Float => "float",
            BitDepth::Custom => "custom",
        };
        f.write_str(name)
    }
}
