//! Integer image windows and the power-of-two RoI algebra.
//!
//! Hosts describe image bounds, render windows and regions of interest as
//! half-open integer rectangles `(x1, y1, x2, y2)`: `x1`/`y1` inclusive,
//! `x2`/`y2` exclusive. Coordinates are signed, windows may start left of or
//! below the origin, and the extreme values act as "infinite" sentinels.
//!
//! # Pyramid windows
//!
//! Level `L` of an image pyramid covers the source window halved `L` times.
//! Halving uses the *smallest enclosing* rectangle: the lower corner is
//! floored and the upper corner is ceiled, so every source pixel lands in
//! some destination pixel and halving once more from level `L` gives the
//! same window as halving `L + 1` times from level 0:
//!
//! ```rust
//! use ofxs_core::RectI;
//!
//! let full = RectI::new(-3, 0, 17, 9);
//! let once = full.downscale_power_of_two_smallest_enclosing(1);
//! assert_eq!(once, RectI::new(-2, 0, 9, 5));
//! assert_eq!(
//!     once.downscale_power_of_two_smallest_enclosing(1),
//!     full.downscale_power_of_two_smallest_enclosing(2),
//! );
//! ```
//!
//! # Used By
//!
//! - [`crate::image::ImageView`] - Buffer bounds and pixel addressing
//! - `ofxs-mipmap` - Per-level render windows

use std::fmt;

/// Lower coordinate sentinel meaning "unbounded".
pub const INFINITE_MIN: i32 = i32::MIN;

/// Upper coordinate sentinel meaning "unbounded".
pub const INFINITE_MAX: i32 = i32::MAX;

/// A half-open integer rectangle in image pixel coordinates.
///
/// # Invariants
///
/// - `x1 <= x2` and `y1 <= y2` for a well-formed window
/// - A window with `x1 == x2` or `y1 == y2` is empty
///
/// # Example
///
/// ```rust
/// use ofxs_core::RectI;
///
/// let r = RectI::new(10, 20, 110, 70);
/// assert_eq!(r.width(), 100);
/// assert_eq!(r.height(), 50);
/// assert!(r.contains_point(10, 20));
/// assert!(!r.contains_point(110, 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectI {
    /// Left edge (inclusive)
    pub x1: i32,
    /// Bottom edge (inclusive)
    pub y1: i32,
    /// Right edge (exclusive)
    pub x2: i32,
    /// Top edge (exclusive)
    pub y2: i32,
}

impl RectI {
    /// Creates a window from its corner coordinates.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a window at the origin with the given dimensions.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels, zero for malformed windows.
    #[inline]
    pub const fn width(&self) -> usize {
        if self.x2 > self.x1 {
            (self.x2 as i64 - self.x1 as i64) as usize
        } else {
            0
        }
    }

    /// Height in pixels, zero for malformed windows.
    #[inline]
    pub const fn height(&self) -> usize {
        if self.y2 > self.y1 {
            (self.y2 as i64 - self.y1 as i64) as usize
        } else {
            0
        }
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns `true` if the window covers no pixel.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Returns `true` if the corners are ordered (`x1 <= x2`, `y1 <= y2`).
    #[inline]
    pub const fn is_well_formed(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if pixel `(x, y)` lies inside the window.
    #[inline]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x1 <= x && x < self.x2 && self.y1 <= y && y < self.y2
    }

    /// Returns `true` if `other` lies entirely inside this window.
    ///
    /// Empty windows are contained in every window.
    #[inline]
    pub const fn contains(&self, other: &RectI) -> bool {
        other.is_empty()
            || (other.x1 >= self.x1
                && other.y1 >= self.y1
                && other.x2 <= self.x2
                && other.y2 <= self.y2)
    }

    /// Halves the window `levels` times, keeping every covered pixel.
    ///
    /// Lower corners are floored, upper corners are ceiled, infinite
    /// sentinels are preserved. `levels == 0` returns the window unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ofxs_core::RectI;
    ///
    /// let r = RectI::new(1, 1, 7, 7);
    /// assert_eq!(r.downscale_power_of_two_smallest_enclosing(1), RectI::new(0, 0, 4, 4));
    /// assert_eq!(r.downscale_power_of_two_smallest_enclosing(3), RectI::new(0, 0, 1, 1));
    /// ```
    pub fn downscale_power_of_two_smallest_enclosing(&self, levels: u32) -> RectI {
        if levels == 0 {
            return *self;
        }
        RectI::new(
            lower_floor(self.x1, levels),
            lower_floor(self.y1, levels),
            upper_ceil(self.x2, levels),
            upper_ceil(self.y2, levels),
        )
    }
}

impl fmt::Display for RectI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

// Shifts past 62 bits would overflow i64; every i32 is already 0 or -1 there.
#[inline]
fn shift(levels: u32) -> u32 {
    levels.min(62)
}

#[inline]
fn lower_floor(v: i32, levels: u32) -> i32 {
    if v <= INFINITE_MIN {
        INFINITE_MIN
    } else {
        ((v as i64) >> shift(levels)) as i32
    }
}

#[inline]
fn upper_ceil(v: i32, levels: u32) -> i32 {
    if v >= INFINITE_MAX {
        INFINITE_MAX
    } else {
        let pot_minus1 = (1i64 << shift(levels)) - 1;
        ((v as i64 + pot_minus1) >> shift(levels)) as i32
    }
}

/// The RoI halving service consulted between pyramid levels.
///
/// Implementations must compose: `downscale(downscale(r, a), b)` equals
/// `downscale(r, a + b)` for every window. The pyramid builder relies on
/// this to keep consecutive levels aligned.
pub trait RoiHalving {
    /// Returns the window covering `window` after `levels` halvings.
    fn downscale(&self, window: RectI, levels: u32) -> RectI;
}

/// Default [`RoiHalving`]: smallest enclosing power-of-two rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerOfTwoEnclosing;

impl RoiHalving for PowerOfTwoEnclosing {
    #[inline]
    fn downscale(&self, window: RectI, levels: u32) -> RectI {
        window.downscale_power_of_two_smallest_enclosing(levels)
    }
}
