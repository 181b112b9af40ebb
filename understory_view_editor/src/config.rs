// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied viewport configuration.

use kurbo::{Size, Vec2};
use understory_gesture::GestureConfig;

use crate::error::ConfigError;
use crate::modes::{
    Capabilities, CropConvention, RotationPolicy, TransformOrigin, ZoomAnchor, ZoomReference,
};

/// Timing of settle animations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleTiming {
    /// Length of every settle animation.
    pub duration_ms: u64,
    /// Elastic easing bounciness; `0.0` is a plain ease-out.
    pub bounciness: f64,
}

impl Default for SettleTiming {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            bounciness: 1.0,
        }
    }
}

/// Everything a [`crate::ViewEditor`] needs to know about its content and
/// viewport.
///
/// The host owns this value. It is re-validated by
/// [`crate::ViewEditor::set_config`] on every change.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Natural size of the content.
    pub content_size: Size,
    /// Size of the viewport (mask) the content is shown through.
    pub container_size: Size,
    /// Larger container used instead of `container_size` when computing the
    /// minimum (fit) scale, for example when several viewers share one page.
    pub fit_container: Option<Size>,
    /// Gap allowed between a viewport edge and the content edge.
    pub mask_padding: f64,
    /// Behavior switches.
    pub capabilities: Capabilities,
    /// Upper scale bound enforced after a gesture.
    pub max_zoom_scale: f64,
    /// How pinch distance maps to scale.
    pub zoom_reference: ZoomReference,
    /// Where pinch zoom is anchored.
    pub zoom_anchor: ZoomAnchor,
    /// Point of the content scale and rotation are applied around.
    pub transform_origin: TransformOrigin,
    /// Crop region convention used when the capture context does not choose one.
    pub crop_convention: CropConvention,
    /// Treatment of the committed rotation.
    pub rotation_policy: RotationPolicy,
    /// Scale animated to at mount instead of the fit scale.
    pub initial_scale: Option<f64>,
    /// Pan applied at mount.
    pub initial_pan: Option<Vec2>,
    /// Settle animation timing.
    pub settle: SettleTiming,
    /// Press and long press thresholds.
    pub gesture: GestureConfig,
}

impl ViewportConfig {
    /// Creates a configuration with default policies.
    #[must_use]
    pub fn new(content_size: Size, container_size: Size) -> Self {
        Self {
            content_size,
            container_size,
            fit_container: None,
            mask_padding: 0.0,
            capabilities: Capabilities::default(),
            max_zoom_scale: 1.0,
            zoom_reference: ZoomReference::default(),
            zoom_anchor: ZoomAnchor::default(),
            transform_origin: TransformOrigin::default(),
            crop_convention: CropConvention::default(),
            rotation_policy: RotationPolicy::default(),
            initial_scale: None,
            initial_pan: None,
            settle: SettleTiming::default(),
            gesture: GestureConfig::default(),
        }
    }

    /// Sets the fit container.
    #[must_use]
    pub fn with_fit_container(mut self, size: Size) -> Self {
        self.fit_container = Some(size);
        self
    }

    /// Sets the mask padding.
    #[must_use]
    pub fn with_mask_padding(mut self, padding: f64) -> Self {
        self.mask_padding = padding;
        self
    }

    /// Replaces the capability set.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Turns one capability on or off.
    #[must_use]
    pub fn with_capability(mut self, capability: Capabilities, enabled: bool) -> Self {
        self.capabilities.set(capability, enabled);
        self
    }

    /// Sets the maximum zoom scale.
    #[must_use]
    pub fn with_max_zoom_scale(mut self, scale: f64) -> Self {
        self.max_zoom_scale = scale;
        self
    }

    /// Sets the pinch zoom reference.
    #[must_use]
    pub fn with_zoom_reference(mut self, reference: ZoomReference) -> Self {
        self.zoom_reference = reference;
        self
    }

    /// Sets the pinch zoom anchor.
    #[must_use]
    pub fn with_zoom_anchor(mut self, anchor: ZoomAnchor) -> Self {
        self.zoom_anchor = anchor;
        self
    }

    /// Sets the transform origin.
    #[must_use]
    pub fn with_transform_origin(mut self, origin: TransformOrigin) -> Self {
        self.transform_origin = origin;
        self
    }

    /// Sets the default crop convention.
    #[must_use]
    pub fn with_crop_convention(mut self, convention: CropConvention) -> Self {
        self.crop_convention = convention;
        self
    }

    /// Sets the rotation policy.
    #[must_use]
    pub fn with_rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.rotation_policy = policy;
        self
    }

    /// Sets the scale animated to at mount.
    #[must_use]
    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = Some(scale);
        self
    }

    /// Sets the pan applied at mount.
    #[must_use]
    pub fn with_initial_pan(mut self, pan: Vec2) -> Self {
        self.initial_pan = Some(pan);
        self
    }

    /// Sets the settle animation timing.
    #[must_use]
    pub fn with_settle(mut self, settle: SettleTiming) -> Self {
        self.settle = settle;
        self
    }

    /// Sets the press thresholds.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Returns `true` if `capability` is enabled.
    #[must_use]
    pub fn has(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Container used for the minimum scale fit.
    #[must_use]
    pub fn fit_size(&self) -> Size {
        self.fit_container.unwrap_or(self.container_size)
    }

    /// Checks every field that feeds a division or ends up in the transform.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_size(self.content_size) {
            return Err(ConfigError::ContentSize {
                width: self.content_size.width,
                height: self.content_size.height,
            });
        }
        if !positive_size(self.container_size) {
            return Err(ConfigError::ContainerSize {
                width: self.container_size.width,
                height: self.container_size.height,
            });
        }
        if let Some(fit) = self.fit_container {
            if !positive_size(fit) {
                return Err(ConfigError::FitContainerSize {
                    width: fit.width,
                    height: fit.height,
                });
            }
        }
        if !self.mask_padding.is_finite() || self.mask_padding < 0.0 {
            return Err(ConfigError::MaskPadding(self.mask_padding));
        }
        if !positive(self.max_zoom_scale) {
            return Err(ConfigError::MaxZoomScale(self.max_zoom_scale));
        }
        if let Some(scale) = self.initial_scale {
            if !positive(scale) {
                return Err(ConfigError::InitialScale(scale));
            }
        }
        if let Some(pan) = self.initial_pan {
            if !pan.is_finite() {
                return Err(ConfigError::InitialPan { x: pan.x, y: pan.y });
            }
        }
        if !self.settle.bounciness.is_finite() || self.settle.bounciness < 0.0 {
            return Err(ConfigError::Bounciness(self.settle.bounciness));
        }
        let min = crate::boundary::min_scale(self);
        if !positive(min) {
            return Err(ConfigError::MinScale(min));
        }
        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn positive_size(size: Size) -> bool {
    positive(size.width) && positive(size.height)
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::ViewportConfig;
    use crate::error::ConfigError;

    fn base() -> ViewportConfig {
        ViewportConfig::new(Size::new(1000.0, 800.0), Size::new(500.0, 400.0))
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(base().validate(), Ok(()));
    }

    #[test]
    fn zero_content_is_rejected() {
        let cfg = ViewportConfig::new(Size::new(0.0, 800.0), Size::new(500.0, 400.0));
        assert!(matches!(cfg.validate(), Err(ConfigError::ContentSize { .. })));
    }

    #[test]
    fn negative_container_is_rejected() {
        let cfg = ViewportConfig::new(Size::new(10.0, 10.0), Size::new(500.0, -1.0));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ContainerSize { .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let cfg = ViewportConfig::new(Size::new(f64::NAN, 10.0), Size::new(5.0, 5.0));
        assert!(cfg.validate().is_err());
        assert_eq!(
            base().with_mask_padding(f64::INFINITY).validate(),
            Err(ConfigError::MaskPadding(f64::INFINITY))
        );
        assert!(matches!(
            base()
                .with_initial_pan(Vec2::new(f64::NAN, 0.0))
                .validate(),
            Err(ConfigError::InitialPan { .. })
        ));
    }

    #[test]
    fn scale_fields_must_be_positive() {
        assert_eq!(
            base().with_max_zoom_scale(0.0).validate(),
            Err(ConfigError::MaxZoomScale(0.0))
        );
        assert_eq!(
            base().with_initial_scale(-2.0).validate(),
            Err(ConfigError::InitialScale(-2.0))
        );
        assert_eq!(base().with_mask_padding(-1.0).validate(), Err(ConfigError::MaskPadding(-1.0)));
    }

    #[test]
    fn fit_container_overrides_container_for_fit() {
        let cfg = base().with_fit_container(Size::new(2000.0, 1600.0));
        assert_eq!(cfg.fit_size(), Size::new(2000.0, 1600.0));
        assert!(matches!(
            base().with_fit_container(Size::ZERO).validate(),
            Err(ConfigError::FitContainerSize { .. })
        ));
    }

    #[test]
    fn errors_describe_the_field() {
        let msg = alloc::format!("{}", ConfigError::MaskPadding(-3.0));
        assert!(msg.contains("mask padding"));
    }
}
