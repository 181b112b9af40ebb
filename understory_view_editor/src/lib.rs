// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View Editor: touch-driven pan, zoom and rotate for content shown
//! through a fixed viewport.
//!
//! A [`ViewEditor`] owns the transform of one piece of content (an image or
//! any other rendered surface) inside a viewport, sometimes called the mask.
//! The host feeds it touch samples and clock ticks; the editor applies drags
//! and pinches immediately and, when a gesture ends outside the allowed
//! region, animates the content back:
//! - the scale settles into `[min_scale, max_scale]`, where the minimum makes
//!   the content fit inside (or, with [`Capabilities::REQUIRES_MIN_SCALE`],
//!   cover) the viewport;
//! - the pan settles so no edge of the viewport is left uncovered, or, with
//!   [`Capabilities::CENTER`], so smaller content is centered.
//!
//! While a settle animation is in flight no new gesture is claimed.
//!
//! The editor does not render, does not deliver touch events and does not
//! read a clock. Host notifications are returned as [`EditorEvent`]s from the
//! call that caused them.
//!
//! The pieces are usable on their own:
//! - [`boundary`]: scale limits and the containment correction.
//! - [`animation`]: per-axis settle animations with elastic easing.
//! - [`crop`]: the visible region of the content, and the capture and crop
//!   collaborator traits.
//! - [`TransformState`]: committed and live pan, scale and rotation.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_gesture::TouchEvent;
//! use understory_view_editor::{EditorEvent, ViewEditor, ViewportConfig};
//!
//! let config = ViewportConfig::new(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
//! let mut editor = ViewEditor::new(config).unwrap();
//! editor.mount(0);
//! assert_eq!(editor.transform().scale(), 0.5);
//!
//! // Drag the content up and to the left, beyond the far edge.
//! editor.handle_touch(&TouchEvent::start([Point::new(300.0, 300.0)], 0));
//! editor.handle_touch(&TouchEvent::moved([Point::new(0.0, 0.0)], 16));
//! editor.handle_touch(&TouchEvent::end(32));
//! assert!(editor.is_animating());
//!
//! // The content exactly fits, so it settles back to the origin.
//! let events = editor.tick(1_000);
//! assert_eq!(events, [EditorEvent::Settled]);
//! assert_eq!(editor.transform().pan(), Vec2::ZERO);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo and Understory Gesture.
//! - `libm`: use `libm` for float functions in `no_std` builds.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod boundary;
mod config;
pub mod crop;
mod editor;
mod error;
mod modes;
mod transform;

pub use config::{SettleTiming, ViewportConfig};
pub use crop::{CaptureContext, CaptureRequest, CropBackend, CropRegion, FrameCapture};
pub use editor::{EditorEvent, EditorEvents, PanAndScale, RejectReason, ViewEditor};
pub use error::{CaptureError, CollaboratorError, ConfigError};
pub use modes::{
    Capabilities, CropConvention, RotationPolicy, TransformOrigin, ZoomAnchor, ZoomReference,
};
pub use transform::TransformState;
