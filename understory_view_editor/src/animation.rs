// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animations.
//!
//! The coordinator keeps at most one animation per [`Axis`]. Starting a new
//! animation on a busy axis replaces the old one, and the replaced
//! animation's settle action is dropped without being returned. Time is
//! supplied by the caller; nothing here reads a clock.
//!
//! ```
//! use understory_view_editor::animation::{AnimationCoordinator, Easing};
//!
//! let mut anim = AnimationCoordinator::new(100, Easing::Linear);
//! anim.animate_scale(1.0, 2.0, 0, "scale settled");
//! assert_eq!(anim.tick(50).scale, Some(1.5));
//!
//! let frame = anim.tick(100);
//! assert_eq!(frame.scale, Some(2.0));
//! assert_eq!(frame.settled.as_slice(), &["scale settled"]);
//! assert!(!anim.is_animating());
//! ```

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `cos`
use kurbo::Vec2;
use smallvec::SmallVec;

/// Easing curve applied to linear progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Elastic ease-out: `1 - cos(t·π/2)³ · cos(t·b·π)`.
    ///
    /// With `bounciness` 0 this is a cubic-cosine ease-out; larger values
    /// overshoot the target and oscillate back.
    Elastic {
        /// Oscillation strength.
        bounciness: f64,
    },
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto eased progress.
    ///
    /// Both ends are exact: `apply(0) == 0` and `apply(1) == 1`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Elastic { bounciness } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let c = (t * PI / 2.0).cos();
                1.0 - c * c * c * (t * bounciness * PI).cos()
            }
        }
    }
}

/// Values a [`Tween`] can move between.
pub trait Interpolate: Copy {
    /// Returns the value at fraction `t` from `self` to `to`.
    ///
    /// `t` may leave `[0, 1]` for overshooting easings.
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

/// Time-based interpolation between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    /// Value at the start.
    pub from: T,
    /// Value at the end.
    pub to: T,
    /// Start time in milliseconds.
    pub start_ms: u64,
    /// Length in milliseconds.
    pub duration_ms: u64,
    /// Easing curve.
    pub easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Linear progress at `now_ms`, clamped into `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    /// Returns `true` once the end time has been reached.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Value at `now_ms`; exactly `to` once finished.
    #[must_use]
    pub fn sample(&self, now_ms: u64) -> T {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            self.to
        } else {
            self.from.interpolate(self.to, self.easing.apply(t))
        }
    }
}

/// Animated quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Pan delta.
    Pan,
    /// Scale.
    Scale,
}

#[derive(Clone, Debug)]
struct Track<T, S> {
    tween: Tween<T>,
    on_settle: S,
}

/// Values sampled by one [`AnimationCoordinator::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<S> {
    /// New pan delta, if the pan axis is animating.
    pub pan: Option<Vec2>,
    /// New scale, if the scale axis is animating.
    pub scale: Option<f64>,
    /// Settle actions of animations that finished on this tick, scale first.
    ///
    /// Apply the sampled values before running these.
    pub settled: SmallVec<[S; 2]>,
}

impl<S> Default for Frame<S> {
    fn default() -> Self {
        Self {
            pan: None,
            scale: None,
            settled: SmallVec::new(),
        }
    }
}

/// Runs at most one animation per axis and hands back settle actions.
#[derive(Clone, Debug)]
pub struct AnimationCoordinator<S> {
    duration_ms: u64,
    easing: Easing,
    pan: Option<Track<Vec2, S>>,
    scale: Option<Track<f64, S>>,
}

impl<S> AnimationCoordinator<S> {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            pan: None,
            scale: None,
        }
    }

    /// Changes timing for animations started from now on.
    pub fn set_timing(&mut self, duration_ms: u64, easing: Easing) {
        self.duration_ms = duration_ms;
        self.easing = easing;
    }

    fn tween<T>(&self, from: T, to: T, now_ms: u64) -> Tween<T> {
        Tween {
            from,
            to,
            start_ms: now_ms,
            duration_ms: self.duration_ms,
            easing: self.easing,
        }
    }

    /// Animates the pan delta, replacing any pan animation in flight.
    pub fn animate_pan(&mut self, from: Vec2, to: Vec2, now_ms: u64, on_settle: S) {
        if self.pan.is_some() {
            log::trace!("pan animation superseded");
        }
        log::trace!("animating pan {from:?} -> {to:?}");
        self.pan = Some(Track {
            tween: self.tween(from, to, now_ms),
            on_settle,
        });
    }

    /// Animates the scale, replacing any scale animation in flight.
    pub fn animate_scale(&mut self, from: f64, to: f64, now_ms: u64, on_settle: S) {
        if self.scale.is_some() {
            log::trace!("scale animation superseded");
        }
        log::trace!("animating scale {from} -> {to}");
        self.scale = Some(Track {
            tween: self.tween(from, to, now_ms),
            on_settle,
        });
    }

    /// Returns `true` while any axis is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pan.is_some() || self.scale.is_some()
    }

    /// Returns `true` while `axis` is animating.
    #[must_use]
    pub fn is_animating_axis(&self, axis: Axis) -> bool {
        match axis {
            Axis::Pan => self.pan.is_some(),
            Axis::Scale => self.scale.is_some(),
        }
    }

    /// Target of the pan animation in flight.
    #[must_use]
    pub fn pan_target(&self) -> Option<Vec2> {
        self.pan.as_ref().map(|t| t.tween.to)
    }

    /// Target of the scale animation in flight.
    #[must_use]
    pub fn scale_target(&self) -> Option<f64> {
        self.scale.as_ref().map(|t| t.tween.to)
    }

    /// Samples every axis at `now_ms` and retires finished animations.
    pub fn tick(&mut self, now_ms: u64) -> Frame<S> {
        let mut frame = Frame::default();
        if let Some(track) = &self.scale {
            frame.scale = Some(track.tween.sample(now_ms));
            if track.tween.is_finished(now_ms) {
                if let Some(done) = self.scale.take() {
                    frame.settled.push(done.on_settle);
                }
            }
        }
        if let Some(track) = &self.pan {
            frame.pan = Some(track.tween.sample(now_ms));
            if track.tween.is_finished(now_ms) {
                if let Some(done) = self.pan.take() {
                    frame.settled.push(done.on_settle);
                }
            }
        }
        frame
    }

    /// Drops every animation without returning its settle action.
    pub fn cancel_all(&mut self) {
        if self.is_animating() {
            log::debug!("settle animations cancelled");
        }
        self.pan = None;
        self.scale = None;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;

    #[test]
    fn elastic_hits_both_ends() {
        for b in [0.0, 1.0, 2.5] {
            let e = Easing::Elastic { bounciness: b };
            assert!(e.apply(0.0).abs() < 1e-12);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(7.0), 1.0);
        }
    }

    #[test]
    fn elastic_overshoots_with_bounce() {
        let e = Easing::Elastic { bounciness: 1.0 };
        let peak = (1..100)
            .map(|i| e.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn tween_samples_and_finishes() {
        let t = Tween {
            from: 10.0,
            to: 20.0,
            start_ms: 100,
            duration_ms: 200,
            easing: Easing::Linear,
        };
        assert_eq!(t.sample(50), 10.0);
        assert_eq!(t.sample(200), 15.0);
        assert!(!t.is_finished(299));
        assert!(t.is_finished(300));
        assert_eq!(t.sample(10_000), 20.0);
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut anim = AnimationCoordinator::new(0, Easing::Linear);
        anim.animate_pan(Vec2::ZERO, Vec2::new(3.0, 4.0), 0, 7_u8);
        let frame = anim.tick(0);
        assert_eq!(frame.pan, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(frame.settled.as_slice(), &[7]);
    }

    #[test]
    fn new_animation_supersedes_same_axis() {
        let mut anim = AnimationCoordinator::new(100, Easing::Linear);
        anim.animate_pan(Vec2::ZERO, Vec2::new(100.0, 0.0), 0, "first");
        anim.animate_pan(Vec2::ZERO, Vec2::new(0.0, 100.0), 50, "second");
        assert_eq!(anim.pan_target(), Some(Vec2::new(0.0, 100.0)));

        let frame = anim.tick(150);
        assert_eq!(frame.settled.as_slice(), &["second"]);
        assert!(!anim.is_animating());
    }

    #[test]
    fn axes_run_independently() {
        let mut anim = AnimationCoordinator::new(100, Easing::Linear);
        anim.animate_scale(1.0, 2.0, 0, "scale");
        anim.animate_pan(Vec2::ZERO, Vec2::new(10.0, 0.0), 50, "pan");
        assert!(anim.is_animating_axis(Axis::Scale));
        assert!(anim.is_animating_axis(Axis::Pan));

        let frame = anim.tick(100);
        assert_eq!(frame.settled.as_slice(), &["scale"]);
        assert_eq!(frame.pan, Some(Vec2::new(5.0, 0.0)));
        assert!(anim.is_animating_axis(Axis::Pan));

        let frame = anim.tick(150);
        assert_eq!(frame.scale, None);
        assert_eq!(frame.settled.as_slice(), &["pan"]);
    }

    #[test]
    fn cancel_drops_settle_actions() {
        let mut anim = AnimationCoordinator::new(100, Easing::Linear);
        anim.animate_scale(1.0, 2.0, 0, "scale");
        anim.cancel_all();
        assert!(!anim.is_animating());
        assert_eq!(anim.tick(1_000), Frame::default());
    }
}
