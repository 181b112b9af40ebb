// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracker: turns touch samples into pan, pinch and press events.
//!
//! ## Usage
//!
//! 1) Feed every [`TouchEvent`] the host delivers into [`GestureTracker::handle`].
//! 2) Apply the returned [`GestureEvent`]s to whatever is being manipulated.
//! 3) Call [`GestureTracker::poll`] from the frame loop so long presses are
//!    reported even when the finger does not move.
//!
//! Single-finger sessions report [`GestureEvent::Pan`] with the offset from
//! the first contact. As soon as a sample carries a different number of
//! contacts the session becomes multi-touch for good and reports
//! [`GestureEvent::Pinch`] relative to the geometry of that first multi-touch
//! sample.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::{GestureEvent, GestureTracker, TouchEvent};
//!
//! let mut tracker = GestureTracker::default();
//! tracker.handle(&TouchEvent::start([Point::new(10.0, 10.0)], 0));
//! let events = tracker.handle(&TouchEvent::moved([Point::new(40.0, 20.0)], 16));
//! assert!(events.contains(&GestureEvent::Pan { delta: Vec2::new(30.0, 10.0) }));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::geometry::TwoFingerGeometry;
use crate::session::GestureSession;
use crate::touch::{TouchEvent, TouchPhase};

/// Thresholds used for press recognition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Hold time after which a still single contact becomes a long press.
    ///
    /// `None` disables long press recognition.
    pub long_press_ms: Option<u64>,
    /// Distance a single contact may wander before the gesture counts as a move.
    pub press_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: Some(500),
            press_slop: 10.0,
        }
    }
}

/// Coarse state of the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No session.
    #[default]
    Idle,
    /// One contact, never more in this session.
    SingleTouch,
    /// The session has seen more than one contact.
    MultiTouch,
}

/// Incremental two-finger update, relative to the session's pinch snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    /// Current finger distance minus the snapshot distance.
    pub distance_delta: f64,
    /// Current finger angle minus the snapshot angle, in degrees.
    pub angle_delta: f64,
    /// Current finger midpoint.
    pub center: Point,
    /// Finger midpoint at the snapshot.
    pub initial_center: Point,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureSummary {
    /// The session escalated to multi-touch at some point.
    pub multi_touch: bool,
    /// The contact moved beyond the press slop.
    pub moved: bool,
    /// The host cancelled the gesture instead of the fingers lifting.
    pub cancelled: bool,
    /// Session length in milliseconds.
    pub duration_ms: u64,
}

/// Output of the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A session opened.
    Began,
    /// Single-contact offset since the first contact of the session.
    Pan {
        /// Cumulative offset, not a per-sample step.
        delta: Vec2,
    },
    /// The session escalated to multi-touch.
    MultiTouchBegan,
    /// Two-finger geometry changed.
    Pinch(PinchUpdate),
    /// The gesture started moving (slop exceeded or multi-touch).
    MoveStarted,
    /// A short tap ended.
    Press,
    /// A still contact was held for the long press time.
    LongPress,
    /// The contact that produced [`GestureEvent::LongPress`] lifted.
    LongPressRelease,
    /// The session closed.
    Ended(GestureSummary),
}

/// Events produced by one call into the tracker.
pub type GestureEvents = SmallVec<[GestureEvent; 4]>;

/// Multi-touch gesture state machine.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    session: Option<GestureSession>,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Returns the press thresholds.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces the press thresholds. An active session keeps running.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match &self.session {
            None => GesturePhase::Idle,
            Some(s) if s.multi_touch => GesturePhase::MultiTouch,
            Some(_) => GesturePhase::SingleTouch,
        }
    }

    /// Returns `true` while a session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Processes one touch sample.
    ///
    /// A `Start` or `Move` with at least one contact opens a session when none
    /// is open. `End`/`Cancel` without a session are ignored.
    pub fn handle(&mut self, event: &TouchEvent) -> GestureEvents {
        let mut out = GestureEvents::new();
        match event.phase {
            TouchPhase::Start | TouchPhase::Move => {
                let Some(&first) = event.touches.first() else {
                    log::trace!("touch sample without contacts ignored");
                    return out;
                };
                if self.session.is_none() {
                    log::debug!("gesture session opened at {first:?}");
                    self.session = Some(GestureSession::open(first, event.time_ms));
                    out.push(GestureEvent::Began);
                }
                self.sample(event, &mut out);
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.finish(event, &mut out);
            }
        }
        out
    }

    /// Reports a long press once a still contact has been held long enough.
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let config = self.config;
        let session = self.session.as_mut()?;
        check_long_press(session, &config, now_ms).then_some(GestureEvent::LongPress)
    }

    /// Drops any open session without emitting events.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            log::debug!("gesture session discarded");
        }
    }

    fn sample(&mut self, event: &TouchEvent, out: &mut GestureEvents) {
        let config = self.config;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let count = event.touch_count();
        session.touch_count = count;

        if count == 1 && !session.multi_touch {
            let delta = session.track_single(event.touches[0]);
            if !session.moved && delta.hypot() > config.press_slop {
                session.moved = true;
                out.push(GestureEvent::MoveStarted);
            }
            if check_long_press(session, &config, event.time_ms) {
                out.push(GestureEvent::LongPress);
            }
            out.push(GestureEvent::Pan { delta });
            return;
        }

        // One finger left over from a multi-touch session: hold still.
        let Some(geometry) = TwoFingerGeometry::from_touches(&event.touches) else {
            return;
        };
        if !session.multi_touch {
            session.multi_touch = true;
            out.push(GestureEvent::MultiTouchBegan);
            if !session.moved {
                session.moved = true;
                out.push(GestureEvent::MoveStarted);
            }
        }
        let snapshot = session.snapshot_pinch(geometry);
        out.push(GestureEvent::Pinch(PinchUpdate {
            distance_delta: geometry.distance - snapshot.distance,
            angle_delta: geometry.angle - snapshot.angle,
            center: geometry.center,
            initial_center: snapshot.center,
        }));
    }

    fn finish(&mut self, event: &TouchEvent, out: &mut GestureEvents) {
        let config = self.config;
        let Some(mut session) = self.session.take() else {
            log::debug!("{:?} without an open gesture session ignored", event.phase);
            return;
        };
        let cancelled = event.phase == TouchPhase::Cancel;
        if !cancelled && check_long_press(&mut session, &config, event.time_ms) {
            out.push(GestureEvent::LongPress);
        }
        if session.long_press_fired {
            out.push(GestureEvent::LongPressRelease);
        } else if !cancelled && !session.moved && !session.multi_touch {
            out.push(GestureEvent::Press);
        }
        let summary = GestureSummary {
            multi_touch: session.multi_touch,
            moved: session.moved,
            cancelled,
            duration_ms: session.elapsed_ms(event.time_ms),
        };
        log::debug!("gesture session closed: {summary:?}");
        out.push(GestureEvent::Ended(summary));
    }
}

fn check_long_press(session: &mut GestureSession, config: &GestureConfig, now_ms: u64) -> bool {
    let Some(threshold) = config.long_press_ms else {
        return false;
    };
    if session.long_press_fired || session.moved || session.multi_touch {
        return false;
    }
    if session.elapsed_ms(now_ms) < threshold {
        return false;
    }
    session.long_press_fired = true;
    true
}
