// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of the viewport back onto the content, and the collaborator
//! traits used to capture and crop a frame.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Point, Rect, Size};

use crate::config::ViewportConfig;
use crate::modes::CropConvention;
use crate::transform::TransformState;

/// Rectangle of the content, in content-space pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRegion {
    /// Top-left corner.
    pub offset: Point,
    /// Extent.
    pub size: Size,
}

impl CropRegion {
    /// Creates a region.
    #[must_use]
    pub fn new(offset: Point, size: Size) -> Self {
        Self { offset, size }
    }

    /// The region as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }

    /// Returns `true` if the region covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }
}

impl From<Rect> for CropRegion {
    fn from(rect: Rect) -> Self {
        Self {
            offset: rect.origin(),
            size: rect.size(),
        }
    }
}

/// Computes the region of the content currently visible in the viewport.
///
/// The two conventions are not numerically interchangeable; see
/// [`CropConvention`].
#[must_use]
pub fn crop_region(
    state: &TransformState,
    config: &ViewportConfig,
    convention: CropConvention,
) -> CropRegion {
    match convention {
        CropConvention::ViewportInverse => state.visible_content_rect(config).into(),
        CropConvention::CaptureSpace => capture_space(state, config),
    }
}

fn capture_space(state: &TransformState, config: &ViewportConfig) -> CropRegion {
    let s = state.scale();
    let pan = state.pan();
    let (x, width) = capture_axis(
        config.content_size.width,
        config.container_size.width,
        s,
        pan.x,
    );
    let (y, height) = capture_axis(
        config.content_size.height,
        config.container_size.height,
        s,
        pan.y,
    );
    CropRegion::new(Point::new(x, y), Size::new(width, height))
}

fn capture_axis(content: f64, container: f64, scale: f64, pan: f64) -> (f64, f64) {
    let scaled = scale * content;
    let (centering, extent) = if scaled < container {
        ((container - scaled) / 2.0, content)
    } else {
        (0.0, content - (scale - container / content) * content)
    };
    let offset = (content - scaled) / 2.0 + pan - centering;
    (offset, extent.floor())
}

/// Frame capture parameters handed to a [`FrameCapture`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureRequest {
    /// Size of the frame to rasterize: the content's natural size, so the
    /// captured pixels share the crop region's coordinate space.
    pub size: Size,
    /// Region of the content that will be cropped from the frame.
    pub region: CropRegion,
}

/// Host-provided capability that rasterizes the current frame.
pub trait FrameCapture {
    /// Capture failure.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Returns encoded image bytes of the current frame.
    fn capture_frame(&mut self, request: &CaptureRequest) -> Result<Vec<u8>, Self::Error>;
}

/// Host-provided capability that crops encoded image bytes.
pub trait CropBackend {
    /// Crop failure.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Returns `image` cropped to `region`, encoded.
    fn crop(&mut self, image: &[u8], region: &CropRegion) -> Result<Vec<u8>, Self::Error>;
}

/// Per-capture overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaptureContext {
    /// Crop this region instead of the computed one.
    pub region: Option<CropRegion>,
    /// Use this convention instead of the configured one.
    pub convention: Option<CropConvention>,
}

impl CaptureContext {
    /// Context that crops exactly `region`.
    #[must_use]
    pub fn with_region(region: CropRegion) -> Self {
        Self {
            region: Some(region),
            convention: None,
        }
    }

    /// Context that computes the region with `convention`.
    #[must_use]
    pub fn with_convention(convention: CropConvention) -> Self {
        Self {
            region: None,
            convention: Some(convention),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{CropRegion, crop_region};
    use crate::config::ViewportConfig;
    use crate::modes::CropConvention;
    use crate::transform::TransformState;

    #[test]
    fn identity_crops_full_content() {
        let cfg = ViewportConfig::new(Size::new(640.0, 480.0), Size::new(640.0, 480.0));
        let state = TransformState::new(1.0);
        for convention in [CropConvention::ViewportInverse, CropConvention::CaptureSpace] {
            let region = crop_region(&state, &cfg, convention);
            assert_eq!(region.rect(), Rect::new(0.0, 0.0, 640.0, 480.0));
        }
    }

    #[test]
    fn viewport_inverse_follows_zoom_and_pan() {
        let cfg = ViewportConfig::new(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
        let mut state = TransformState::new(1.0);
        state.set_offset(Vec2::new(-200.0, -100.0));
        let region = crop_region(&state, &cfg, CropConvention::ViewportInverse);
        assert_eq!(region.offset, Point::new(200.0, 100.0));
        assert_eq!(region.size, Size::new(500.0, 500.0));
    }

    #[test]
    fn viewport_inverse_clips_to_content() {
        let cfg = ViewportConfig::new(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
        let mut state = TransformState::new(0.5);
        state.set_offset(Vec2::new(0.0, 125.0));
        let region = crop_region(&state, &cfg, CropConvention::ViewportInverse);
        assert_eq!(region.rect(), Rect::new(0.0, 0.0, 1000.0, 500.0));
    }

    #[test]
    fn capture_space_keeps_whole_axis_when_smaller() {
        let cfg = ViewportConfig::new(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
        let state = TransformState::new(0.5);
        let region = crop_region(&state, &cfg, CropConvention::CaptureSpace);
        // Height: 250 shown in 500, so the whole 500 rows are kept.
        assert_eq!(region.size.height, 500.0);
        assert_eq!(region.offset.y, 125.0 - 125.0);
        // Width exactly fills the viewport.
        assert_eq!(region.size.width, 1000.0);
        assert_eq!(region.offset.x, 250.0);
    }

    #[test]
    fn empty_regions_are_detected() {
        assert!(CropRegion::new(Point::ORIGIN, Size::new(0.0, 10.0)).is_empty());
        assert!(!CropRegion::new(Point::ORIGIN, Size::new(1.0, 1.0)).is_empty());
    }
}
