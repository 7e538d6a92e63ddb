//! # ofxs-core
//!
//! Core types shared by the OFX support crates.
//!
//! Image effect plugins receive their pixels from the host as raw, strided
//! buffers tagged with a component layout and a bit depth. This crate gives
//! those buffers a typed, bounds-checked shape:
//!
//! - [`RectI`] - Half-open integer image window and the power-of-two RoI algebra
//! - [`RoiHalving`] - The RoI halving service used between pyramid levels
//! - [`PixelComponents`], [`BitDepth`] - Host pixel format tags
//! - [`PixelData`], [`PixelSource`], [`PixelDestination`] - Tagged host buffers
//! - [`ImageView`], [`ImageViewMut`] - Strided views over typed pixels
//! - [`PixelValue`] - Numeric channel types the filters are generic over
//! - [`ImageMemory`], [`ImageMemoryAllocator`] - Scoped image memory
//! - [`Error`] - Unified error type
//!
//! ## Crate Structure
//!
//! ```text
//! ofxs-core (this crate)
//!    ^
//!    |
//!    +-- ofxs-color (colorspace formulas, transfer LUTs)
//!    +-- ofxs-mipmap (box-halving filter, pyramid builder)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`RectI`], [`PixelComponents`] and [`BitDepth`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod memory;
pub mod pixel;
pub mod rect;

pub use error::*;
pub use format::{BitDepth, PixelComponents};
pub use image::{ImageView, ImageViewMut, PixelData, PixelDataMut, PixelDestination, PixelSource};
pub use memory::{HeapAllocator, ImageMemory, ImageMemoryAllocator};
pub use pixel::PixelValue;
pub use rect::{PowerOfTwoEnclosing, RectI, RoiHalving, INFINITE_MAX, INFINITE_MIN};
