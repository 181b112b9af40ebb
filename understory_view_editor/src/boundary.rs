// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment policy: scale bounds and the pan correction that brings content
//! back inside the viewport.
//!
//! All functions are pure. Scale correction must be decided first: position
//! bounds depend on the scale the content will settle at.

use kurbo::Vec2;

use crate::config::ViewportConfig;
use crate::modes::{Capabilities, TransformOrigin};

/// Smallest scale allowed after a gesture.
///
/// With [`Capabilities::REQUIRES_MIN_SCALE`] the content must cover the fit
/// container (larger axis ratio); otherwise it must fit inside it (smaller
/// axis ratio).
#[must_use]
pub fn min_scale(config: &ViewportConfig) -> f64 {
    let fit = config.fit_size();
    let rw = fit.width / config.content_size.width;
    let rh = fit.height / config.content_size.height;
    if config.has(Capabilities::REQUIRES_MIN_SCALE) {
        rw.max(rh)
    } else {
        rw.min(rh)
    }
}

/// Largest scale allowed after a gesture.
///
/// Never below [`min_scale`], so the allowed range is never empty.
#[must_use]
pub fn max_scale(config: &ViewportConfig) -> f64 {
    config.max_zoom_scale.max(min_scale(config))
}

/// Scale a freshly mounted editor starts at.
#[must_use]
pub fn fit_scale(config: &ViewportConfig) -> f64 {
    min_scale(config)
}

/// Outcome of checking a committed scale against the allowed range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleCorrection {
    /// The scale is within `[min_scale, max_scale]`.
    InRange,
    /// Too small; settle to the contained minimum.
    Below(f64),
    /// Too large; settle to the contained maximum.
    Above(f64),
}

impl ScaleCorrection {
    /// Scale to settle at, if a correction is needed.
    #[must_use]
    pub fn target(self) -> Option<f64> {
        match self {
            Self::InRange => None,
            Self::Below(t) | Self::Above(t) => Some(t),
        }
    }
}

/// Checks `scale` against the configured range.
#[must_use]
pub fn scale_correction(scale: f64, config: &ViewportConfig) -> ScaleCorrection {
    let min = min_scale(config);
    let max = max_scale(config);
    if scale < min {
        ScaleCorrection::Below(min)
    } else if scale > max {
        ScaleCorrection::Above(max)
    } else {
        ScaleCorrection::InRange
    }
}

/// Allowed pan range at a given scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanBounds {
    /// Smallest allowed pan per axis (content pushed towards the far edge).
    pub min: Vec2,
    /// Largest allowed pan per axis (content pushed towards the near edge).
    pub max: Vec2,
}

impl PanBounds {
    /// Clamps `pan` into the bounds.
    #[must_use]
    pub fn clamp(&self, pan: Vec2) -> Vec2 {
        Vec2::new(
            pan.x.clamp(self.min.x, self.max.x),
            pan.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Returns `true` if `pan` needs no correction.
    #[must_use]
    pub fn contains(&self, pan: Vec2) -> bool {
        self.clamp(pan) == pan
    }
}

/// Computes the pan range for content shown at `scale`.
///
/// Per axis, with `diff = scale·content - container`:
/// - the effective padding is half the slack when the content is smaller and
///   [`Capabilities::CENTER`] is set, the mask padding otherwise;
/// - the near edge may not move past `padding`, the far edge may not move
///   inside `container - padding`;
/// - with [`TransformOrigin::Center`] both limits shift by half the size
///   change, since the renderer scales about the content center.
///
/// When content is smaller than the padded viewport without centering, the
/// two limits cross and the far edge wins: the content is pinned `padding`
/// away from the right or bottom of the viewport.
#[must_use]
pub fn pan_bounds(scale: f64, config: &ViewportConfig) -> PanBounds {
    let center = config.has(Capabilities::CENTER);
    let (min_x, max_x) = axis_bounds(
        config.content_size.width,
        config.container_size.width,
        scale,
        config.mask_padding,
        center,
        config.transform_origin,
    );
    let (min_y, max_y) = axis_bounds(
        config.content_size.height,
        config.container_size.height,
        scale,
        config.mask_padding,
        center,
        config.transform_origin,
    );
    PanBounds {
        min: Vec2::new(min_x, min_y),
        max: Vec2::new(max_x, max_y),
    }
}

fn axis_bounds(
    content: f64,
    container: f64,
    scale: f64,
    mask_padding: f64,
    center: bool,
    origin: TransformOrigin,
) -> (f64, f64) {
    let scaled = scale * content;
    let diff = scaled - container;
    let padding = if diff < 0.0 && center {
        -diff / 2.0
    } else {
        mask_padding
    };
    let half_slack = match origin {
        TransformOrigin::TopLeft => 0.0,
        TransformOrigin::Center => (content - scaled) / 2.0,
    };
    let max = padding - half_slack;
    let min = -(diff + padding) - half_slack;
    if min > max { (min, min) } else { (min, max) }
}

/// Pan correction computed at the end of a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionCorrection {
    /// Amount to add to the pan.
    pub delta: Vec2,
    /// The content was dragged down past the top edge.
    pub hit_top_edge: bool,
}

impl PositionCorrection {
    /// Returns `true` when no movement is needed.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.delta == Vec2::ZERO
    }
}

/// Computes the correction that moves `pan` into [`pan_bounds`] at `scale`.
#[must_use]
pub fn position_correction(pan: Vec2, scale: f64, config: &ViewportConfig) -> PositionCorrection {
    let bounds = pan_bounds(scale, config);
    let target = bounds.clamp(pan);
    PositionCorrection {
        delta: target - pan,
        hit_top_edge: pan.y > bounds.max.y,
    }
}
