//! # ofxs-mipmap
//!
//! Power-of-two mipmap construction for OFX image effects.
//!
//! When a host renders at a reduced scale, a plugin often needs its source
//! image at that scale too. This crate produces it by repeated 2x box
//! downsampling:
//!
//! - [`halve_window`] - One 2x2 box-halving pass over a window
//! - [`build_mip_map_level`] - One level, built from full resolution
//!   through scratch buffers
//! - [`build_mip_maps_for_components`] - All levels `1..=max_level`, each
//!   kept in its own buffer
//! - [`scale_pixel_data`], [`build_mip_maps`] - Host-facing entry points
//!   working on runtime-tagged buffers
//!
//! Windows are half-open [`RectI`](ofxs_core::RectI)s in each level's own
//! coordinates. Level `L` covers the full-resolution window halved `L`
//! times by the context's [`RoiHalving`](ofxs_core::RoiHalving) service.
//!
//! ## Boundary Handling
//!
//! A source pixel outside the source bounds is left out of the average
//! instead of being treated as black, so odd-sized images keep their
//! brightness along the right and bottom edges.
//!
//! ## Example
//!
//! ```rust
//! use ofxs_core::{ImageView, RectI};
//! use ofxs_mipmap::{MipMapContext, MipMapSet, build_mip_maps_for_components};
//!
//! let bounds = RectI::new(0, 0, 8, 8);
//! let pixels = vec![0.25f32; 64];
//! let src = ImageView::new(&pixels, bounds, 8, 1).unwrap();
//!
//! let ctx = MipMapContext::new();
//! let mut levels = MipMapSet::<f32>::with_levels(3);
//! build_mip_maps_for_components::<f32, 1, _, _>(&ctx, bounds, &src, 3, &mut levels).unwrap();
//! assert_eq!(levels.level(3).unwrap().bounds, RectI::new(0, 0, 1, 1));
//! ```
//!
//! ## Logging
//!
//! Progress is reported through `tracing`: `trace` per halving pass,
//! `debug` per level and scratch buffer, `warn` on allocation failure.

#![warn(missing_docs)]

pub mod context;
pub mod halve;
pub mod level;
pub mod pyramid;
pub mod scale;

pub use context::MipMapContext;
pub use halve::{halve_window, is_halving_aligned};
pub use level::build_mip_map_level;
pub use pyramid::{MipMap, MipMapSet, build_mip_maps_for_components};
pub use scale::{build_mip_maps, scale_pixel_data};
