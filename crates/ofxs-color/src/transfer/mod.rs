//! Transfer functions between encoded and linear values.
//!
//! - **EOTF**: Encoded -> Linear
//! - **OETF**: Linear -> Encoded
//!
//! | Module | Use Case | Range |
//! |--------|----------|-------|
//! | [`srgb`] | Web, consumer displays | [0, 1] |
//! | [`rec709`] | HDTV broadcast | [0, 1] |
//! | [`gamma`] | Pure power curves | [0, 1] |
//!
//! ```rust
//! use ofxs_color::transfer::srgb;
//!
//! let linear = srgb::eotf(0.5);
//! assert!((srgb::oetf(linear) - 0.5).abs() < 1e-5);
//! ```

pub mod gamma;
pub mod rec709;
pub mod srgb;
