//! Numeric channel types.
//!
//! Filters in the support crates are generic over the channel type and the
//! channel count. [`PixelValue`] is the contract a channel type must meet:
//! it names a wider accumulator so that summing a handful of taps cannot
//! overflow, and it defines how an accumulated sum is averaged back.
//!
//! | Type | Accumulator | Averaging |
//! |------|-------------|-----------|
//! | `f32` | `f32` | native division |
//! | `f64` | `f64` | native division |
//! | `f16` | `f32` | f32 division, rounded to half |
//! | `u8` | `u32` | truncating integer division |
//! | `u16` | `u32` | truncating integer division |
//!
//! ```rust
//! use ofxs_core::PixelValue;
//!
//! let sum = 1u8.widen() + 2u8.widen();
//! assert_eq!(u8::average(sum, 2), 1); // truncates
//! assert_eq!(f32::average(1.0 + 2.0, 2), 1.5);
//! ```

use std::ops::Add;

use half::f16;

use crate::format::BitDepth;

/// A channel type the box filters can average.
pub trait PixelValue: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Accumulator wide enough for a sum of four values.
    type Accum: Copy + Add<Output = Self::Accum>;

    /// Additive identity of the accumulator.
    const ZERO: Self::Accum;

    /// Host bit depth carrying this type.
    const DEPTH: BitDepth;

    /// Converts to the accumulator type.
    fn widen(self) -> Self::Accum;

    /// Divides an accumulated sum by the number of summed values.
    ///
    /// `count` is never zero.
    fn average(sum: Self::Accum, count: u32) -> Self;
}

impl PixelValue for f32 {
    type Accum = f32;
    const ZERO: f32 = 0.0;
    const DEPTH: BitDepth = BitDepth::Float;

    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn average(sum: f32, count: u32) -> f32 {
        sum / count as f32
    }
}

impl PixelValue for f64 {
    type Accum = f64;
    const ZERO: f64 = 0.0;
    const DEPTH: BitDepth = BitDepth::Custom;

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn average(sum: f64, count: u32) -> f64 {
        sum / count as f64
    }
}

impl PixelValue for f16 {
    type Accum = f32;
    const ZERO: f32 = 0.0;
    const DEPTH: BitDepth = BitDepth::Half;

    #[inline]
    fn widen(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn average(sum: f32, count: u32) -> f16 {
        f16::from_f32(sum / count as f32)
    }
}

impl PixelValue for u8 {
    type Accum = u32;
    const ZERO: u32 = 0;
    const DEPTH: BitDepth = BitDepth::UByte;

    #[inline]
    fn widen(self) -> u32 {
        self as u32
    }

    #[inline]
    fn average(sum: u32, count: u32) -> u8 {
        (sum / count) as u8
    }
}

impl PixelValue for u16 {
    type Accum = u32;
    const ZERO: u32 = 0;
    const DEPTH: BitDepth = BitDepth::UShort;

    #[inline]
    fn widen(self) -> u32 {
        self as u32
    }

    #[inline]
    fn average(sum: u32, count: u32) -> u16 {
        (sum / count) as u16
    }
}
