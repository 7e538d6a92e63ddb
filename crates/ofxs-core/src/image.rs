//! Host pixel buffers and strided views over them.
//!
//! # Overview
//!
//! - [`PixelData`], [`PixelDataMut`] - Pixel slices tagged with their bit depth
//! - [`PixelSource`], [`PixelDestination`] - A tagged slice plus its layout,
//!   bounds and row stride in bytes, exactly what a host passes around
//! - [`ImageView`], [`ImageViewMut`] - Validated typed views addressed in
//!   image coordinates
//!
//! # Addressing
//!
//! A view is allocated for its `bounds`. Channel `k` of pixel `(x, y)` lives
//! at
//!
//! ```text
//! (y - bounds.y1) * row_stride + (x - bounds.x1) * components + k
//! ```
//!
//! where `row_stride` counts elements, not bytes. Rows may be padded
//! (`row_stride > width * components`).
//!
//! # Example
//!
//! ```rust
//! use ofxs_core::{ImageView, RectI};
//!
//! let data = vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
//! // 3x2 single channel image whose lower-left pixel is (10, 20)
//! let view = ImageView::new(&data, RectI::new(10, 20, 13, 22), 3, 1).unwrap();
//! assert_eq!(view.pixel(12, 21), &[5.0]);
//! ```

use std::mem::size_of;

use half::f16;

use crate::error::{Error, Result};
use crate::format::{BitDepth, PixelComponents};
use crate::pixel::PixelValue;
use crate::rect::RectI;

/// Read-only pixel slice tagged with its bit depth.
#[derive(Debug, Clone, Copy)]
pub enum PixelData<'a> {
    /// 8-bit unsigned channels.
    UByte(&'a [u8]),
    /// 16-bit unsigned channels.
    UShort(&'a [u16]),
    /// Half float channels.
    Half(&'a [f16]),
    /// 32-bit float channels.
    Float(&'a [f32]),
}

impl PixelData<'_> {
    /// Bit depth of the slice.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        match self {
            PixelData::UByte(_) => BitDepth::UByte,
            PixelData::UShort(_) => BitDepth::UShort,
            PixelData::Half(_) => BitDepth::Half,
            PixelData::Float(_) => BitDepth::Float,
        }
    }

    /// Number of channel values in the slice.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PixelData::UByte(d) => d.len(),
            PixelData::UShort(d) => d.len(),
            PixelData::Half(d) => d.len(),
            PixelData::Float(d) => d.len(),
        }
    }

    /// Returns `true` if the slice holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writable pixel slice tagged with its bit depth.
#[derive(Debug)]
pub enum PixelDataMut<'a> {
    /// 8-bit unsigned channels.
    UByte(&'a mut [u8]),
    /// 16-bit unsigned channels.
    UShort(&'a mut [u16]),
    /// Half float channels.
    Half(&'a mut [f16]),
    /// 32-bit float channels.
    Float(&'a mut [f32]),
}

impl PixelDataMut<'_> {
    /// Bit depth of the slice.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        match self {
            PixelDataMut::UByte(_) => BitDepth::UByte,
            PixelDataMut::UShort(_) => BitDepth::UShort,
            PixelDataMut::Half(_) => BitDepth::Half,
            PixelDataMut::Float(_) => BitDepth::Float,
        }
    }
}

/// A host source image: tagged pixels, layout, bounds and row stride.
#[derive(Debug, Clone, Copy)]
pub struct PixelSource<'a> {
    /// Pixel values
    pub data: PixelData<'a>,
    /// Channel layout
    pub components: PixelComponents,
    /// Window the buffer was allocated for
    pub bounds: RectI,
    /// Distance between consecutive rows, in bytes
    pub row_bytes: usize,
}

impl<'a> PixelSource<'a> {
    /// Bit depth of the pixel values.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.data.depth()
    }

    /// Typed view over 32-bit float pixels.
    ///
    /// Fails with a format error for any other depth, and with a shape error
    /// if the stride or length cannot describe `bounds`.
    pub fn float_view(&self) -> Result<ImageView<'a, f32>> {
        match self.data {
            PixelData::Float(data) => {
                let stride = row_stride_elements::<f32>(self.row_bytes, self.bounds, self.components)?;
                ImageView::new(data, self.bounds, stride, self.components.count())
            }
            other => Err(Error::unsupported_format(format!(
                "{} {} source",
                self.components,
                other.depth()
            ))),
        }
    }
}

/// A host destination image: tagged pixels, layout, bounds and row stride.
#[derive(Debug)]
pub struct PixelDestination<'a> {
    /// Pixel values
    pub data: PixelDataMut<'a>,
    /// Channel layout
    pub components: PixelComponents,
    /// Window the buffer was allocated for
    pub bounds: RectI,
    /// Distance between consecutive rows, in bytes
    pub row_bytes: usize,
}

impl PixelDestination<'_> {
    /// Bit depth of the pixel values.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.data.depth()
    }

    /// Typed writable view over 32-bit float pixels.
    pub fn float_view_mut(&mut self) -> Result<ImageViewMut<'_, f32>> {
        let components = self.components;
        let bounds = self.bounds;
        let row_bytes = self.row_bytes;
        match &mut self.data {
            PixelDataMut::Float(data) => {
                let stride = row_stride_elements::<f32>(row_bytes, bounds, components)?;
                ImageViewMut::new(data, bounds, stride, components.count())
            }
            other => Err(Error::unsupported_format(format!(
                "{} {} destination",
                components,
                other.depth()
            ))),
        }
    }
}

/// Converts a byte stride to an element stride.
fn row_stride_elements<P>(row_bytes: usize, bounds: RectI, components: PixelComponents) -> Result<usize> {
    let size = size_of::<P>();
    let min_row_bytes = bounds.width() * components.count() * size;
    if row_bytes % size != 0 || row_bytes < min_row_bytes {
        return Err(Error::InvalidStride {
            row_bytes,
            min_row_bytes,
        });
    }
    Ok(row_bytes / size)
}

/// Validates a view shape and returns the element count it addresses.
fn required_len<P>(len: usize, bounds: RectI, row_stride: usize, components: usize) -> Result<usize> {
    if !bounds.is_well_formed() {
        return Err(Error::invalid_region(bounds, bounds));
    }
    let row_len = bounds.width() * components;
    if row_stride < row_len {
        return Err(Error::InvalidStride {
            row_bytes: row_stride * size_of::<P>(),
            min_row_bytes: row_len * size_of::<P>(),
        });
    }
    let required = match bounds.height() {
        0 => 0,
        h => (h - 1) * row_stride + row_len,
    };
    if len < required {
        return Err(Error::BufferTooSmall { len, required });
    }
    Ok(required)
}

/// Read-only strided view addressed in image coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, P> {
    data: &'a [P],
    bounds: RectI,
    row_stride: usize,
    components: usize,
}

impl<'a, P: PixelValue> ImageView<'a, P> {
    /// Creates a view after checking that `data` covers `bounds`.
    ///
    /// `row_stride` is in elements.
    pub fn new(data: &'a [P], bounds: RectI, row_stride: usize, components: usize) -> Result<Self> {
        required_len::<P>(data.len(), bounds, row_stride, components)?;
        Ok(Self {
            data,
            bounds,
            row_stride,
            components,
        })
    }

    /// Window the underlying buffer was allocated for.
    #[inline]
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Row stride in elements.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Channels per pixel.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Underlying slice.
    #[inline]
    pub fn data(&self) -> &'a [P] {
        self.data
    }

    /// Index of channel 0 of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// In debug builds, if the pixel is outside the bounds.
    #[inline]
    pub fn pixel_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds.contains_point(x, y), "({x}, {y}) outside {}", self.bounds);
        (y - self.bounds.y1) as usize * self.row_stride + (x - self.bounds.x1) as usize * self.components
    }

    /// Channels of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> &'a [P] {
        let start = self.pixel_offset(x, y);
        &self.data[start..start + self.components]
    }

    /// Full row `y`, from `bounds.x1` to `bounds.x2`.
    #[inline]
    pub fn row(&self, y: i32) -> &'a [P] {
        let start = self.pixel_offset(self.bounds.x1, y);
        &self.data[start..start + self.bounds.width() * self.components]
    }
}

/// Writable strided view addressed in image coordinates.
#[derive(Debug)]
pub struct ImageViewMut<'a, P> {
    data: &'a mut [P],
    bounds: RectI,
    row_stride: usize,
    components: usize,
}

impl<'a, P: PixelValue> ImageViewMut<'a, P> {
    /// Creates a view after checking that `data` covers `bounds`.
    ///
    /// `row_stride` is in elements.
    pub fn new(data: &'a mut [P], bounds: RectI, row_stride: usize, components: usize) -> Result<Self> {
        required_len::<P>(data.len(), bounds, row_stride, components)?;
        Ok(Self {
            data,
            bounds,
            row_stride,
            components,
        })
    }

    /// Window the underlying buffer was allocated for.
    #[inline]
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Row stride in elements.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Channels per pixel.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Index of channel 0 of pixel `(x, y)`.
    #[inline]
    pub fn pixel_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds.contains_point(x, y), "({x}, {y}) outside {}", self.bounds);
        (y - self.bounds.y1) as usize * self.row_stride + (x - self.bounds.x1) as usize * self.components
    }

    /// Mutable full row `y`, from `bounds.x1` to `bounds.x2`.
    #[inline]
    pub fn row_mut(&mut self, y: i32) -> &mut [P] {
        let start = self.pixel_offset(self.bounds.x1, y);
        let len = self.bounds.width() * self.components;
        &mut self.data[start..start + len]
    }

    /// Copies `window` from `src`, row by row.
    ///
    /// Both views must contain `window` and have the same channel count.
    pub fn copy_window_from(&mut self, window: RectI, src: &ImageView<'_, P>) -> Result<()> {
        if window.is_empty() {
            return Ok(());
        }
        if !self.bounds.contains(&window) {
            return Err(Error::invalid_region(window, self.bounds));
        }
        if !src.bounds().contains(&window) {
            return Err(Error::invalid_region(window, src.bounds()));
        }
        if src.components() != self.components {
            return Err(Error::format_mismatch(
                format!("{} channels", src.components()),
                format!("{} channels", self.components),
            ));
        }
        let len = window.width() * self.components;
        for y in window.y1..window.y2 {
            let s = src.pixel_offset(window.x1, y);
            let d = self.pixel_offset(window.x1, y);
            self.data[d..d + len].copy_from_slice(&src.data()[s..s + len]);
        }
        Ok(())
    }
}
