// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View Editor Image: a [`CropBackend`] built on the `image` crate.
//!
//! [`ImageCropper`] decodes encoded bytes, crops them to a
//! [`CropRegion`] and re-encodes the result. Use it with
//! [`ViewEditor::crop_content`] for static bitmaps, or with
//! [`ViewEditor::capture_frame_and_crop`] for captured frames.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use image::{ImageFormat, RgbaImage};
//! use kurbo::{Point, Size};
//! use understory_view_editor::{CropBackend, CropRegion};
//! use understory_view_editor_image::ImageCropper;
//!
//! let mut png = Vec::new();
//! RgbaImage::new(64, 32)
//!     .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
//!     .unwrap();
//!
//! let region = CropRegion::new(Point::new(8.0, 4.0), Size::new(16.0, 16.0));
//! let cropped = ImageCropper::new(ImageFormat::Png).crop(&png, &region).unwrap();
//! let decoded = image::load_from_memory(&cropped).unwrap();
//! assert_eq!((decoded.width(), decoded.height()), (16, 16));
//! ```
//!
//! [`ViewEditor::crop_content`]: understory_view_editor::ViewEditor::crop_content
//! [`ViewEditor::capture_frame_and_crop`]: understory_view_editor::ViewEditor::capture_frame_and_crop

use std::io::Cursor;

use image::{ImageError, ImageFormat};
use understory_view_editor::{CropBackend, CropRegion};

/// Failure of [`ImageCropper`].
#[derive(Debug, thiserror::Error)]
pub enum ImageCropError {
    /// The input bytes could not be decoded.
    #[error("failed to decode image")]
    Decode(#[source] ImageError),
    /// The cropped image could not be encoded.
    #[error("failed to encode cropped image")]
    Encode(#[source] ImageError),
    /// After rounding to whole pixels the region does not overlap the image.
    #[error("crop region {region:?} is outside the {width}x{height} image")]
    OutOfBounds {
        /// Requested region.
        region: CropRegion,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}

/// Pixel rectangle `(x, y, width, height)`.
type PixelRect = (u32, u32, u32, u32);

/// Crops encoded images with the `image` crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageCropper {
    format: ImageFormat,
}

impl ImageCropper {
    /// Creates a cropper that encodes its output as `format`.
    #[must_use]
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }

    /// Output format.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl Default for ImageCropper {
    fn default() -> Self {
        Self::new(ImageFormat::Png)
    }
}

impl CropBackend for ImageCropper {
    type Error = ImageCropError;

    fn crop(&mut self, image: &[u8], region: &CropRegion) -> Result<Vec<u8>, ImageCropError> {
        let decoded = image::load_from_memory(image).map_err(ImageCropError::Decode)?;
        let (width, height) = (decoded.width(), decoded.height());
        let (x, y, w, h) =
            pixel_rect(region, width, height).ok_or_else(|| ImageCropError::OutOfBounds {
                region: *region,
                width,
                height,
            })?;
        log::trace!("cropping {width}x{height} image to {w}x{h} at ({x}, {y})");
        let cropped = decoded.crop_imm(x, y, w, h);
        let mut out = Vec::new();
        cropped
            .write_to(&mut Cursor::new(&mut out), self.format)
            .map_err(ImageCropError::Encode)?;
        Ok(out)
    }
}

/// Rounds `region` to whole pixels and clips it to a `width` x `height`
/// image. Returns `None` when nothing is left.
#[allow(
    clippy::cast_possible_truncation,
    reason = "values are clamped into the u32 image bounds first"
)]
fn pixel_rect(region: &CropRegion, width: u32, height: u32) -> Option<PixelRect> {
    let rect = region.rect().round();
    let x0 = rect.x0.clamp(0.0, f64::from(width));
    let y0 = rect.y0.clamp(0.0, f64::from(height));
    let x1 = rect.x1.clamp(0.0, f64::from(width));
    let y1 = rect.y1.clamp(0.0, f64::from(height));
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    Some((
        x0 as u32,
        y0 as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    ))
}
