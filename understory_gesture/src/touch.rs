// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw touch samples as delivered by the host UI framework.

use kurbo::Point;
use smallvec::SmallVec;

/// Inline capacity for touch sets; two fingers is the common case.
pub type Touches = SmallVec<[Point; 2]>;

/// Phase of a touch sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The first contact went down.
    Start,
    /// One or more contacts moved, or a contact was added or lifted while
    /// others remain down.
    Move,
    /// The last contact lifted.
    End,
    /// The host revoked the gesture (for example another responder claimed it).
    Cancel,
}

/// One touch sample.
///
/// `touches` lists the contacts that are active after this sample, in view
/// coordinates. It is expected to be empty for [`TouchPhase::End`] and may be
/// anything for [`TouchPhase::Cancel`].
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub phase: TouchPhase,
    /// Active contacts.
    pub touches: Touches,
    /// Host timestamp in milliseconds. Only differences are meaningful.
    pub time_ms: u64,
}

impl TouchEvent {
    /// Creates a sample from any iterator of points.
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = Point>, time_ms: u64) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
            time_ms,
        }
    }

    /// A [`TouchPhase::Start`] sample.
    pub fn start(touches: impl IntoIterator<Item = Point>, time_ms: u64) -> Self {
        Self::new(TouchPhase::Start, touches, time_ms)
    }

    /// A [`TouchPhase::Move`] sample.
    pub fn moved(touches: impl IntoIterator<Item = Point>, time_ms: u64) -> Self {
        Self::new(TouchPhase::Move, touches, time_ms)
    }

    /// A [`TouchPhase::End`] sample with no remaining contacts.
    #[must_use]
    pub fn end(time_ms: u64) -> Self {
        Self::new(TouchPhase::End, [], time_ms)
    }

    /// A [`TouchPhase::Cancel`] sample.
    #[must_use]
    pub fn cancel(time_ms: u64) -> Self {
        Self::new(TouchPhase::Cancel, [], time_ms)
    }

    /// Number of active contacts.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Returns `true` for samples that terminate a gesture.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, TouchPhase::End | TouchPhase::Cancel)
    }
}
