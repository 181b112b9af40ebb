// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed and in-gesture transform state, and its affine form.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::config::ViewportConfig;
use crate::modes::{Capabilities, RotationPolicy, TransformOrigin};

/// Pan, scale and rotation of one editor.
///
/// Each quantity has a committed value and a live value:
/// - Pan is `offset + delta`. The offset is the baseline left by the last
///   gesture or settle; the delta accumulates during a gesture or animation
///   and is folded into the offset by [`TransformState::bake_pan`].
/// - Scale and rotation are updated live during a pinch and become
///   authoritative once committed.
///
/// Only the live values are rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    offset: Vec2,
    delta: Vec2,
    scale: f64,
    current_scale: f64,
    rotation_deg: f64,
    current_rotation_deg: f64,
    is_animating: bool,
}

impl TransformState {
    /// Creates a state at `scale` with no pan and no rotation.
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self {
            offset: Vec2::ZERO,
            delta: Vec2::ZERO,
            scale,
            current_scale: scale,
            rotation_deg: 0.0,
            current_rotation_deg: 0.0,
            is_animating: false,
        }
    }

    /// Rendered pan: committed offset plus in-flight delta.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.offset + self.delta
    }

    /// Committed pan baseline.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// In-flight pan delta.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Committed scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Live (rendered) scale.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    /// Committed rotation in degrees.
    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Live rotation in degrees.
    #[must_use]
    pub fn current_rotation_deg(&self) -> f64 {
        self.current_rotation_deg
    }

    /// Whether a settle animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub(crate) fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    /// Replaces the in-flight pan delta.
    pub fn set_pan_delta(&mut self, delta: Vec2) {
        self.delta = delta;
    }

    /// Replaces the committed offset and clears the delta.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.delta = Vec2::ZERO;
    }

    /// Folds the delta into the offset so the next gesture starts from the
    /// rendered position.
    pub fn bake_pan(&mut self) {
        self.offset += self.delta;
        self.delta = Vec2::ZERO;
    }

    /// Sets the live scale. Non-positive or non-finite values are ignored.
    pub fn set_current_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.current_scale = scale;
        }
    }

    /// Makes the live scale the committed scale.
    pub fn commit_scale(&mut self) {
        self.scale = self.current_scale;
    }

    /// Sets the live rotation. Non-finite values are ignored.
    pub fn set_current_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.current_rotation_deg = degrees;
        }
    }

    /// Makes the live rotation the committed rotation, applying `policy`.
    pub fn commit_rotation(&mut self, policy: RotationPolicy) {
        self.rotation_deg = policy.apply(self.current_rotation_deg);
        self.current_rotation_deg = self.rotation_deg;
    }

    /// Rendered transform from content space into viewport space.
    #[must_use]
    pub fn to_affine(&self, config: &ViewportConfig) -> Affine {
        compose(
            self.pan(),
            self.current_scale,
            self.current_rotation_deg,
            config,
        )
    }

    /// Transform built from the committed values only.
    #[must_use]
    pub fn committed_affine(&self, config: &ViewportConfig) -> Affine {
        compose(self.pan(), self.scale, self.rotation_deg, config)
    }

    /// Bounding box of the content in viewport space, as rendered.
    #[must_use]
    pub fn content_rect_in_view(&self, config: &ViewportConfig) -> Rect {
        let content = Rect::from_origin_size(Point::ORIGIN, config.content_size);
        self.to_affine(config).transform_rect_bbox(content)
    }

    /// Part of the content visible through the viewport, in content space.
    ///
    /// Uses the committed scale and rotation. The result is clipped to the
    /// content bounds and may be empty.
    #[must_use]
    pub fn visible_content_rect(&self, config: &ViewportConfig) -> Rect {
        let content = Rect::from_origin_size(Point::ORIGIN, config.content_size);
        let viewport = Rect::from_origin_size(Point::ORIGIN, config.container_size);
        let view_to_content = self.committed_affine(config).inverse();
        view_to_content
            .transform_rect_bbox(viewport)
            .intersect(content)
    }
}

fn compose(pan: Vec2, scale: f64, rotation_deg: f64, config: &ViewportConfig) -> Affine {
    // Content → view: scale (and rotate) about the origin, then translate by pan.
    let rotation = if config.has(Capabilities::ROTATE) {
        Affine::rotate(rotation_deg.to_radians())
    } else {
        Affine::IDENTITY
    };
    let local = rotation * Affine::scale(scale);
    let local = match config.transform_origin {
        TransformOrigin::TopLeft => local,
        TransformOrigin::Center => {
            let c = config.content_size.to_vec2() * 0.5;
            Affine::translate(c) * local * Affine::translate(-c)
        }
    };
    Affine::translate(pan) * local
}
