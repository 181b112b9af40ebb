// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::boxed::Box;

/// A configuration that would make the transform degenerate.
///
/// Every variant names the offending field; the value is carried for
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Content width or height is zero, negative or not finite.
    #[error("content size must be finite and positive, got {width}x{height}")]
    ContentSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// Container (viewport) width or height is zero, negative or not finite.
    #[error("container size must be finite and positive, got {width}x{height}")]
    ContainerSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// The optional fit container is zero, negative or not finite.
    #[error("fit container size must be finite and positive, got {width}x{height}")]
    FitContainerSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// Mask padding is negative or not finite.
    #[error("mask padding must be finite and non-negative, got {0}")]
    MaskPadding(f64),
    /// Maximum zoom scale is zero, negative or not finite.
    #[error("max zoom scale must be finite and positive, got {0}")]
    MaxZoomScale(f64),
    /// Initial scale is zero, negative or not finite.
    #[error("initial scale must be finite and positive, got {0}")]
    InitialScale(f64),
    /// Initial pan has a non-finite component.
    #[error("initial pan must be finite, got ({x}, {y})")]
    InitialPan {
        /// Offending x.
        x: f64,
        /// Offending y.
        y: f64,
    },
    /// Settle bounciness is negative or not finite.
    #[error("settle bounciness must be finite and non-negative, got {0}")]
    Bounciness(f64),
    /// The derived minimum scale is not a positive finite number.
    #[error("derived minimum scale must be finite and positive, got {0}")]
    MinScale(f64),
}

/// Boxed error from a capture or crop collaborator.
pub type CollaboratorError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Failure of [`crate::ViewEditor::capture_frame_and_crop`].
///
/// Collaborator failures are passed through untouched; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The frame capture collaborator failed.
    #[error("frame capture failed")]
    Capture(#[source] CollaboratorError),
    /// The crop collaborator failed.
    #[error("crop failed")]
    Crop(#[source] CollaboratorError),
    /// The crop region has no area (content fully outside the viewport).
    #[error("crop region is empty")]
    EmptyRegion,
    /// Frame capture needs [`crate::Capabilities::CROPPING_REQUIRED`].
    #[error("frame capture is not enabled for this editor")]
    CaptureDisabled,
    /// The editor is not mounted.
    #[error("view editor is not mounted")]
    NotMounted,
}
