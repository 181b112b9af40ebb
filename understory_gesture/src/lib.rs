// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: headless multi-touch gesture recognition.
//!
//! This crate turns a stream of raw touch samples into the handful of
//! high-level gestures a pan/zoom/rotate surface needs:
//!
//! - [`geometry`]: distance, angle and midpoint between two contacts.
//! - [`touch`]: the [`TouchEvent`] samples the host delivers.
//! - [`session`]: per-gesture memory, created on the first contact and
//!   dropped on the last lift.
//! - [`tracker`]: the [`GestureTracker`] state machine producing
//!   [`GestureEvent`]s (pan, pinch/rotate, press, long press).
//!
//! Like the other Understory event-state helpers, the tracker does not assume
//! any particular UI framework. It does not hit test, does not own a transform
//! and does not decide whether a gesture may start; callers gate the first
//! sample themselves and interpret the events.
//!
//! ## Pinch example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{GestureEvent, GestureTracker, TouchEvent};
//!
//! let mut tracker = GestureTracker::default();
//! tracker.handle(&TouchEvent::start(
//!     [Point::new(100.0, 100.0), Point::new(200.0, 100.0)],
//!     0,
//! ));
//! let events = tracker.handle(&TouchEvent::moved(
//!     [Point::new(80.0, 100.0), Point::new(220.0, 100.0)],
//!     16,
//! ));
//! let Some(GestureEvent::Pinch(update)) = events.last() else {
//!     unreachable!()
//! };
//! assert_eq!(update.distance_delta, 40.0);
//! assert_eq!(update.angle_delta, 0.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: use `libm` for float functions in `no_std` builds.
//!
//! This crate is `no_std`.

#![no_std]

pub mod geometry;
pub mod session;
pub mod touch;
pub mod tracker;

pub use geometry::TwoFingerGeometry;
pub use session::{GestureSession, PinchSnapshot};
pub use touch::{TouchEvent, TouchPhase, Touches};
pub use tracker::{
    GestureConfig, GestureEvent, GestureEvents, GesturePhase, GestureSummary, GestureTracker,
    PinchUpdate,
};
