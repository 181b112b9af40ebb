// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability flags and policy enums.

bitflags::bitflags! {
    /// Behavior switches of a [`crate::ViewEditor`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Two-finger twists rotate the rendered content.
        ///
        /// Without this flag the angle is still tracked but never rendered.
        const ROTATE             = 0b0000_0001;
        /// Content smaller than the viewport on an axis is centered on that
        /// axis instead of pinned to the mask padding.
        const CENTER             = 0b0000_0010;
        /// The minimum scale makes the content cover the viewport instead of
        /// fitting inside it.
        const REQUIRES_MIN_SCALE = 0b0000_0100;
        /// Gestures may start at all.
        const PANNING            = 0b0000_1000;
        /// The host renders content into a capturable surface and expects
        /// [`crate::ViewEditor::capture_frame_and_crop`] to be used.
        const CROPPING_REQUIRED  = 0b0001_0000;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::CENTER | Self::PANNING
    }
}

/// Reference length that turns a pinch distance change into a scale change.
///
/// Both variants depend only on the difference between the current and the
/// initial finger distance, so the result does not depend on how many move
/// samples the host delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomReference {
    /// `scale = committed * (container_width + distance_delta) / container_width`.
    #[default]
    ContainerWidth,
    /// The finger distance change is added to the committed content height:
    /// `scale = (committed * content_height + distance_delta) / content_height`.
    ContentHeight,
}

/// Where a pinch zoom is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomAnchor {
    /// Content scales about the transform origin; pan is untouched while pinching.
    #[default]
    Origin,
    /// Pan follows the finger midpoint so the content appears to scale about
    /// the fingers.
    TouchCenter,
}

/// Point of the content that scale and rotation are applied around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransformOrigin {
    /// Scale and rotate about the content's top-left corner. The pan is then
    /// exactly the on-screen position of that corner.
    #[default]
    TopLeft,
    /// Scale and rotate about the content's center, the convention of
    /// style-transform based renderers. The on-screen top-left corner is
    /// shifted by half the size change.
    Center,
}

/// How [`crate::crop::crop_region`] maps the view back onto the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CropConvention {
    /// Map the viewport rectangle through the inverse rendered transform and
    /// intersect with the content bounds. Content-space units.
    #[default]
    ViewportInverse,
    /// Center-origin decomposition used with captured frames: the zoom shift
    /// `(w - s·w)/2` plus the pan, minus the centering slack, with the size
    /// shrunk by the amount the scale exceeds the fit.
    CaptureSpace,
}

/// What happens to the accumulated rotation when a gesture commits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Keep accumulating without bound; several full turns stay visible in
    /// the committed value.
    #[default]
    Unbounded,
    /// Wrap the committed rotation into `[0, 360)`.
    Normalized,
}

impl RotationPolicy {
    /// Applies the policy to a committed rotation in degrees.
    #[must_use]
    pub fn apply(self, degrees: f64) -> f64 {
        match self {
            Self::Unbounded => degrees,
            Self::Normalized => {
                let wrapped = degrees % 360.0;
                let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
                if wrapped >= 360.0 { 0.0 } else { wrapped }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Capabilities, RotationPolicy};

    #[test]
    fn default_capabilities_center_and_pan() {
        let caps = Capabilities::default();
        assert!(caps.contains(Capabilities::CENTER));
        assert!(caps.contains(Capabilities::PANNING));
        assert!(!caps.contains(Capabilities::ROTATE));
        assert!(!caps.contains(Capabilities::REQUIRES_MIN_SCALE));
    }

    #[test]
    fn rotation_policy_wraps_only_when_normalized() {
        assert_eq!(RotationPolicy::Unbounded.apply(725.0), 725.0);
        assert_eq!(RotationPolicy::Normalized.apply(725.0), 5.0);
        assert_eq!(RotationPolicy::Normalized.apply(-90.0), 270.0);
        assert_eq!(RotationPolicy::Normalized.apply(-720.0), 0.0);
        assert_eq!(RotationPolicy::Normalized.apply(359.5), 359.5);
    }
}
