// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture memory, alive from the first contact to the last lift.

use kurbo::{Point, Vec2};

use crate::geometry::TwoFingerGeometry;

/// Two-finger geometry captured at the first multi-touch sample of a session.
///
/// It is taken once and never refreshed when the finger count changes later in
/// the same session, so adding or lifting a third finger does not make the
/// transform jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSnapshot {
    /// Finger distance at the snapshot.
    pub distance: f64,
    /// Finger angle at the snapshot, in degrees.
    pub angle: f64,
    /// Finger midpoint at the snapshot.
    pub center: Point,
}

impl From<TwoFingerGeometry> for PinchSnapshot {
    fn from(g: TwoFingerGeometry) -> Self {
        Self {
            distance: g.distance,
            angle: g.angle,
            center: g.center,
        }
    }
}

/// State of one gesture session.
///
/// Sessions are owned by [`crate::GestureTracker`] and only handed out by
/// shared reference; a fresh session starts with every field reset.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    pub(crate) touch_count: usize,
    pub(crate) start_pos: Point,
    pub(crate) last_pos: Point,
    pub(crate) start_time_ms: u64,
    pub(crate) pinch: Option<PinchSnapshot>,
    pub(crate) multi_touch: bool,
    pub(crate) moved: bool,
    pub(crate) long_press_fired: bool,
}

impl GestureSession {
    pub(crate) fn open(anchor: Point, time_ms: u64) -> Self {
        Self {
            touch_count: 0,
            start_pos: anchor,
            last_pos: anchor,
            start_time_ms: time_ms,
            pinch: None,
            multi_touch: false,
            moved: false,
            long_press_fired: false,
        }
    }

    /// Records a single-contact position and returns the offset from the
    /// session's first contact.
    pub(crate) fn track_single(&mut self, pos: Point) -> Vec2 {
        self.last_pos = pos;
        pos - self.start_pos
    }

    /// Returns the pinch snapshot, taking it from `geometry` if this is the
    /// first multi-touch sample of the session.
    pub(crate) fn snapshot_pinch(&mut self, geometry: TwoFingerGeometry) -> PinchSnapshot {
        *self.pinch.get_or_insert_with(|| geometry.into())
    }

    /// Number of contacts in the latest sample.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touch_count
    }

    /// Offset of the latest single-contact position from the first contact.
    #[must_use]
    pub fn pan_offset(&self) -> Vec2 {
        self.last_pos - self.start_pos
    }

    /// Timestamp of the first sample of the session.
    #[must_use]
    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Milliseconds elapsed between the session start and `now_ms`.
    #[must_use]
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time_ms)
    }

    /// The pinch snapshot, once multi-touch has been seen.
    #[must_use]
    pub fn pinch(&self) -> Option<PinchSnapshot> {
        self.pinch
    }

    /// Whether the session has escalated to multi-touch.
    ///
    /// This is sticky: lifting back to one finger does not clear it.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.multi_touch
    }

    /// Whether the contact moved beyond the press slop (or went multi-touch).
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Whether a long press has been reported in this session.
    #[must_use]
    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;
    use crate::geometry::TwoFingerGeometry;

    #[test]
    fn fresh_session_is_reset() {
        let s = GestureSession::open(Point::new(3.0, 4.0), 100);
        assert_eq!(s.touch_count(), 0);
        assert_eq!(s.pan_offset(), Vec2::ZERO);
        assert!(s.pinch().is_none());
        assert!(!s.is_multi_touch());
        assert!(!s.has_moved());
        assert!(!s.long_press_fired());
    }

    #[test]
    fn single_offsets_are_cumulative_from_start() {
        let mut s = GestureSession::open(Point::new(10.0, 10.0), 0);
        assert_eq!(s.track_single(Point::new(15.0, 12.0)), Vec2::new(5.0, 2.0));
        assert_eq!(s.track_single(Point::new(4.0, 30.0)), Vec2::new(-6.0, 20.0));
        assert_eq!(s.pan_offset(), Vec2::new(-6.0, 20.0));
    }

    #[test]
    fn pinch_snapshot_is_taken_once() {
        let mut s = GestureSession::open(Point::ORIGIN, 0);
        let first =
            TwoFingerGeometry::from_touches(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
                .unwrap();
        let second =
            TwoFingerGeometry::from_touches(&[Point::new(0.0, 0.0), Point::new(0.0, 50.0)])
                .unwrap();

        let a = s.snapshot_pinch(first);
        let b = s.snapshot_pinch(second);
        assert_eq!(a, b);
        assert_eq!(b.distance, 10.0);
        assert_eq!(b.angle, 0.0);
    }

    #[test]
    fn elapsed_saturates_for_out_of_order_clocks() {
        let s = GestureSession::open(Point::ORIGIN, 1_000);
        assert_eq!(s.elapsed_ms(1_250), 250);
        assert_eq!(s.elapsed_ms(900), 0);
    }
}
