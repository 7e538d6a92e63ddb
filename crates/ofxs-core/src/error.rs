//! Error types for OFX support operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the recoverable failure modes of the support
//! code:
//! - Pixel format negotiation (unsupported depth or component layout)
//! - Buffer shape validation (row stride, buffer length, windows)
//! - Image memory allocation
//!
//! RoI misalignment between pyramid levels is a programming error and is
//! reported through `debug_assert!`, not through this type.
//!
//! # Usage
//!
//! ```rust
//! use ofxs_core::{BitDepth, Error, Result};
//!
//! fn require_float(depth: BitDepth) -> Result<()> {
//!     if depth != BitDepth::Float {
//!         return Err(Error::unsupported_format(format!("{depth} pixels")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_float(BitDepth::UByte).unwrap_err().is_format_error());
//! ```

use thiserror::Error;

use crate::rect::RectI;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scaling or pyramiding host images.
///
/// # Categories
///
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat), [`FormatMismatch`](Error::FormatMismatch)
/// - **Shape errors**: [`InvalidStride`](Error::InvalidStride), [`BufferTooSmall`](Error::BufferTooSmall), [`InvalidRegion`](Error::InvalidRegion)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **Caller errors**: [`LevelCountMismatch`](Error::LevelCountMismatch)
#[derive(Debug, Error)]
pub enum Error {
    /// Bit depth or component layout is not handled by the operation.
    ///
    /// The mipmap entry points only accept 32-bit float pixels laid out as
    /// Alpha, RGB or RGBA.
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// Source and destination formats differ.
    #[error("format mismatch: source is {src}, destination is {dst}")]
    FormatMismatch {
        /// Source format description
        src: String,
        /// Destination format description
        dst: String,
    },

    /// Row stride cannot describe the image.
    ///
    /// The stride must be a whole number of elements and hold at least one
    /// row of `width * components` elements.
    #[error("row stride of {row_bytes} bytes is invalid for a row of {min_row_bytes} bytes")]
    InvalidStride {
        /// Provided row stride in bytes
        row_bytes: usize,
        /// Minimum required row stride in bytes
        min_row_bytes: usize,
    },

    /// Pixel buffer is shorter than its bounds and stride require.
    #[error("buffer of {len} elements is too small, {required} required")]
    BufferTooSmall {
        /// Provided length in elements
        len: usize,
        /// Required length in elements
        required: usize,
    },

    /// Window is malformed or not contained in the buffer bounds.
    #[error("window {window} is invalid for bounds {bounds}")]
    InvalidRegion {
        /// Offending window
        window: RectI,
        /// Buffer bounds
        bounds: RectI,
    },

    /// Image memory could not be provided.
    ///
    /// # Fields
    ///
    /// - `requested` - Number of bytes requested
    /// - `reason` - Why the allocator refused
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// Output container does not have one slot per requested level.
    #[error("mipmap container has {got} slots, {expected} levels requested")]
    LevelCountMismatch {
        /// Requested level count
        expected: usize,
        /// Slots present in the container
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::FormatMismatch`] error.
    #[inline]
    pub fn format_mismatch(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::FormatMismatch {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(window: RectI, bounds: RectI) -> Self {
        Self::InvalidRegion { window, bounds }
    }

    /// Returns `true` for format negotiation failures.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::FormatMismatch { .. }
        )
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
