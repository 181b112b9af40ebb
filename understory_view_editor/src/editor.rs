// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pan/zoom/rotate editor.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};
use understory_gesture::{
    GestureEvent, GesturePhase, GestureTracker, PinchUpdate, TouchEvent, TouchPhase,
};

use crate::animation::{AnimationCoordinator, Easing};
use crate::boundary::{self, ScaleCorrection};
use crate::config::{SettleTiming, ViewportConfig};
use crate::crop::{CaptureContext, CaptureRequest, CropBackend, CropRegion, FrameCapture};
use crate::error::{CaptureError, ConfigError};
use crate::modes::{Capabilities, TransformOrigin, ZoomAnchor, ZoomReference};
use crate::transform::TransformState;

/// Lower bound on the live scale during a pinch, relative to the minimum
/// scale. Keeps the transform invertible however far the fingers close.
const PINCH_FLOOR: f64 = 1e-3;

/// Why a gesture was not claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// A settle animation is in flight.
    Animating,
    /// [`Capabilities::PANNING`] is off.
    PanningDisabled,
}

/// Notification for the host, returned from the editor's entry points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorEvent {
    /// A second finger turned the gesture into a pinch.
    ZoomStart,
    /// A pinch ended. `success` is `false` when the scale had to be corrected.
    ZoomEnd {
        /// The pinch ended within the allowed scale range.
        success: bool,
    },
    /// Short tap without movement.
    Press,
    /// Contact held still past the long press threshold.
    LongPress,
    /// Release after a long press.
    LongPressRelease,
    /// The gesture moved beyond the press slop.
    MoveStart,
    /// A gesture that moved has ended.
    MoveEnd,
    /// The content was dragged down past the top edge and is being pulled
    /// back by `correction`.
    DragBelowTopEdge {
        /// Pan correction being animated.
        correction: Vec2,
    },
    /// A gesture was refused at the entry gate.
    GestureRejected {
        /// Reason for refusal.
        reason: RejectReason,
    },
    /// All settle animations have finished.
    Settled,
}

/// Events produced by one call into the editor.
pub type EditorEvents = Vec<EditorEvent>;

/// Rendered pan and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanAndScale {
    /// Pan (offset plus in-flight delta).
    pub pan: Vec2,
    /// Live scale.
    pub scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SettleAction {
    BakePan,
    CommitScale,
    /// Commit the scale, then animate to the given pan.
    CommitScaleThenPan(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Pan/zoom/rotate engine for one viewer.
///
/// The host feeds touch samples and clock ticks in, renders
/// [`ViewEditor::affine`] and reacts to the returned [`EditorEvent`]s.
/// Nothing is shared between editors.
#[derive(Clone, Debug)]
pub struct ViewEditor {
    config: ViewportConfig,
    state: TransformState,
    tracker: GestureTracker,
    animations: AnimationCoordinator<SettleAction>,
    lifecycle: Lifecycle,
    now_ms: u64,
    initial_adjustment: bool,
    rejected: bool,
}

impl ViewEditor {
    /// Creates an unmounted editor at the fit scale.
    pub fn new(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = boundary::fit_scale(&config);
        let (duration_ms, easing) = timing(config.settle);
        Ok(Self {
            state: TransformState::new(scale),
            tracker: GestureTracker::new(config.gesture),
            animations: AnimationCoordinator::new(duration_ms, easing),
            config,
            lifecycle: Lifecycle::Created,
            now_ms: 0,
            initial_adjustment: true,
            rejected: false,
        })
    }

    /// Starts the editor and runs the initial adjustment.
    ///
    /// With an initial scale (clamped into the allowed range) the scale
    /// animates to it first and the pan then animates to the initial pan;
    /// otherwise the initial pan is applied directly and corrected into
    /// bounds.
    pub fn mount(&mut self, now_ms: u64) -> EditorEvents {
        let mut out = EditorEvents::new();
        if self.lifecycle != Lifecycle::Created {
            log::debug!("mount ignored in {:?}", self.lifecycle);
            return out;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.advance(now_ms);
        let pan = self.config.initial_pan.unwrap_or(Vec2::ZERO);
        if let Some(requested) = self.config.initial_scale {
            let scale = boundary::scale_correction(requested, &self.config)
                .target()
                .unwrap_or(requested);
            if scale != requested {
                log::debug!("initial scale {requested} clamped to {scale}");
            }
            self.animations.animate_scale(
                self.state.current_scale(),
                scale,
                self.now_ms,
                SettleAction::CommitScaleThenPan(pan),
            );
            self.sync_animating();
        } else {
            self.state.set_offset(pan);
            self.settle_position(&mut out);
            self.report_if_settled(&mut out);
        }
        out
    }

    /// Returns `true` if a new gesture may start now.
    #[must_use]
    pub fn should_claim_gesture(&self) -> bool {
        self.gate().is_ok()
    }

    fn gate(&self) -> Result<(), Option<RejectReason>> {
        if self.lifecycle != Lifecycle::Mounted {
            return Err(None);
        }
        if self.animations.is_animating() {
            return Err(Some(RejectReason::Animating));
        }
        if !self.config.has(Capabilities::PANNING) {
            return Err(Some(RejectReason::PanningDisabled));
        }
        Ok(())
    }

    /// Processes one touch sample.
    ///
    /// Pan and pinch updates are applied immediately. When the gesture ends
    /// the transform is committed and, if needed, settle animations start.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> EditorEvents {
        let mut out = EditorEvents::new();
        if self.lifecycle != Lifecycle::Mounted {
            log::debug!("touch sample ignored: editor not mounted");
            return out;
        }
        self.advance(event.time_ms);

        if !self.tracker.is_active() {
            match event.phase {
                TouchPhase::Start | TouchPhase::Move => {
                    // Re-checked on every sample so a held finger is picked
                    // up once the editor can accept it.
                    if let Err(reason) = self.gate() {
                        if let Some(reason) = reason
                            && !self.rejected
                        {
                            log::debug!("gesture rejected: {reason:?}");
                            out.push(EditorEvent::GestureRejected { reason });
                        }
                        self.rejected = true;
                        return out;
                    }
                    self.rejected = false;
                }
                TouchPhase::End | TouchPhase::Cancel => {
                    self.rejected = false;
                }
            }
        }

        for gesture in self.tracker.handle(event) {
            match gesture {
                GestureEvent::Began => {
                    log::trace!("gesture began at pan {:?}", self.state.pan());
                }
                GestureEvent::Pan { delta } => {
                    self.state.set_pan_delta(delta);
                    log::trace!("pan delta {delta:?}");
                }
                GestureEvent::MultiTouchBegan => out.push(EditorEvent::ZoomStart),
                GestureEvent::Pinch(update) => self.apply_pinch(&update),
                GestureEvent::MoveStarted => out.push(EditorEvent::MoveStart),
                GestureEvent::Press => out.push(EditorEvent::Press),
                GestureEvent::LongPress => out.push(EditorEvent::LongPress),
                GestureEvent::LongPressRelease => out.push(EditorEvent::LongPressRelease),
                GestureEvent::Ended(summary) => {
                    if summary.moved {
                        out.push(EditorEvent::MoveEnd);
                    }
                    self.end_gesture(summary.multi_touch, &mut out);
                }
            }
        }
        out
    }

    fn apply_pinch(&mut self, update: &PinchUpdate) {
        let committed = self.state.scale();
        let content = self.config.content_size;
        let container = self.config.container_size;
        let scale = match self.config.zoom_reference {
            ZoomReference::ContainerWidth => {
                committed * (container.width + update.distance_delta) / container.width
            }
            ZoomReference::ContentHeight => {
                (committed * content.height + update.distance_delta) / content.height
            }
        };
        let scale = scale.max(boundary::min_scale(&self.config) * PINCH_FLOOR);
        self.state.set_current_scale(scale);
        self.state
            .set_current_rotation(self.state.rotation_deg() + update.angle_delta);

        if self.config.zoom_anchor == ZoomAnchor::TouchCenter {
            let offset = self.state.offset();
            let prev = content * committed;
            let next = content * scale;
            let shift = match self.config.transform_origin {
                TransformOrigin::TopLeft => (prev - next).to_vec2() * 0.5,
                TransformOrigin::Center => Vec2::ZERO,
            };
            let keep = |pan: f64, extent: f64, limit: f64| {
                if pan > 0.0 || extent < limit { 0.0 } else { pan }
            };
            let kept = Vec2::new(
                keep(offset.x, next.width, container.width),
                keep(offset.y, next.height, container.height),
            );
            let pan = (update.center - update.initial_center) + shift + kept;
            self.state.set_pan_delta(pan - offset);
        }
        log::trace!(
            "pinch: scale {scale}, rotation {}",
            self.state.current_rotation_deg()
        );
    }

    fn end_gesture(&mut self, multi_touch: bool, out: &mut EditorEvents) {
        self.state.bake_pan();
        if multi_touch {
            self.state.commit_scale();
            self.state.commit_rotation(self.config.rotation_policy);
            let correction = self.correct_scale();
            out.push(EditorEvent::ZoomEnd {
                success: correction == ScaleCorrection::InRange,
            });
        }
        self.settle_position(out);
        self.report_if_settled(out);
    }

    /// Starts a scale animation if the committed scale is out of range.
    fn correct_scale(&mut self) -> ScaleCorrection {
        let correction = boundary::scale_correction(self.state.scale(), &self.config);
        if let Some(target) = correction.target() {
            log::debug!("scale {} corrected to {target}", self.state.scale());
            self.animations.animate_scale(
                self.state.current_scale(),
                target,
                self.now_ms,
                SettleAction::CommitScale,
            );
            self.sync_animating();
        }
        correction
    }

    /// Starts a pan animation that brings the baked pan into bounds at the
    /// scale the content is settling to.
    fn settle_position(&mut self, out: &mut EditorEvents) {
        let scale = self
            .animations
            .scale_target()
            .unwrap_or(self.state.scale());
        let correction = boundary::position_correction(self.state.pan(), scale, &self.config);
        let initial = core::mem::take(&mut self.initial_adjustment);
        if correction.hit_top_edge && !initial {
            out.push(EditorEvent::DragBelowTopEdge {
                correction: correction.delta,
            });
        }
        if !correction.is_zero() {
            log::debug!("pan {:?} corrected by {:?}", self.state.pan(), correction.delta);
            self.animations.animate_pan(
                self.state.delta(),
                self.state.delta() + correction.delta,
                self.now_ms,
                SettleAction::BakePan,
            );
            self.sync_animating();
        }
    }

    /// Advances the clock, runs animations and checks for a long press.
    pub fn tick(&mut self, now_ms: u64) -> EditorEvents {
        let mut out = EditorEvents::new();
        if self.lifecycle != Lifecycle::Mounted {
            return out;
        }
        self.advance(now_ms);

        if let Some(GestureEvent::LongPress) = self.tracker.poll(self.now_ms) {
            out.push(EditorEvent::LongPress);
        }

        if !self.animations.is_animating() {
            return out;
        }
        let frame = self.animations.tick(self.now_ms);
        if let Some(scale) = frame.scale {
            self.state.set_current_scale(scale);
        }
        if let Some(delta) = frame.pan {
            self.state.set_pan_delta(delta);
        }
        for action in frame.settled {
            self.run_settle_action(action);
        }
        self.sync_animating();
        self.report_if_settled(&mut out);
        out
    }

    fn run_settle_action(&mut self, action: SettleAction) {
        log::trace!("settled: {action:?}");
        match action {
            SettleAction::BakePan => self.state.bake_pan(),
            SettleAction::CommitScale => self.state.commit_scale(),
            SettleAction::CommitScaleThenPan(pan) => {
                self.state.commit_scale();
                self.state.bake_pan();
                let correction =
                    boundary::position_correction(pan, self.state.scale(), &self.config);
                self.initial_adjustment = false;
                let target = pan + correction.delta - self.state.offset();
                if target != Vec2::ZERO {
                    self.animations
                        .animate_pan(Vec2::ZERO, target, self.now_ms, SettleAction::BakePan);
                }
            }
        }
    }

    /// Replaces the configuration.
    ///
    /// An invalid configuration is rejected and the previous one stays in
    /// effect. When the content or container size changed and no gesture is
    /// active, animations in flight are stopped where they are and the
    /// transform is settled against the new sizes.
    pub fn set_config(&mut self, config: ViewportConfig) -> Result<EditorEvents, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("configuration rejected: {err}");
            return Err(err);
        }
        let resized = config.content_size != self.config.content_size
            || config.container_size != self.config.container_size
            || config.fit_container != self.config.fit_container;
        self.tracker.set_config(config.gesture);
        let (duration_ms, easing) = timing(config.settle);
        self.animations.set_timing(duration_ms, easing);
        self.config = config;

        let mut out = EditorEvents::new();
        if !resized || self.lifecycle != Lifecycle::Mounted || self.tracker.is_active() {
            return Ok(out);
        }
        log::debug!("viewport resized, re-settling");
        self.animations.cancel_all();
        self.state.bake_pan();
        self.state.commit_scale();
        self.correct_scale();
        self.settle_position(&mut out);
        self.sync_animating();
        self.report_if_settled(&mut out);
        Ok(out)
    }

    /// Stops the editor.
    ///
    /// Animations are dropped without running their settle actions and any
    /// open gesture is discarded. Every later call is a no-op.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.animations.cancel_all();
        self.tracker.reset();
        self.state.set_animating(false);
        self.lifecycle = Lifecycle::Unmounted;
        log::debug!("view editor unmounted");
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The transform state.
    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.state
    }

    /// Transform to render the content with.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.state.to_affine(&self.config)
    }

    /// Rendered pan and scale.
    #[must_use]
    pub fn pan_and_scale(&self) -> PanAndScale {
        PanAndScale {
            pan: self.state.pan(),
            scale: self.state.current_scale(),
        }
    }

    /// Far corner of the content in viewport space, as rendered.
    #[must_use]
    pub fn scaled_extent(&self) -> Point {
        let size = self.config.content_size;
        self.affine() * Point::new(size.width, size.height)
    }

    /// Returns `true` while a settle animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    /// Returns `true` between [`ViewEditor::mount`] and [`ViewEditor::unmount`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Phase of the gesture in progress.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.tracker.phase()
    }

    /// Region of the content a capture would keep.
    #[must_use]
    pub fn current_crop_region(&self, context: &CaptureContext) -> CropRegion {
        context.region.unwrap_or_else(|| {
            let convention = context.convention.unwrap_or(self.config.crop_convention);
            crate::crop::crop_region(&self.state, &self.config, convention)
        })
    }

    /// Captures the rendered frame and crops it to the visible region.
    ///
    /// Requires [`Capabilities::CROPPING_REQUIRED`].
    pub fn capture_frame_and_crop<C, B>(
        &self,
        context: &CaptureContext,
        capture: &mut C,
        cropper: &mut B,
    ) -> Result<Vec<u8>, CaptureError>
    where
        C: FrameCapture,
        B: CropBackend,
    {
        if !self.config.has(Capabilities::CROPPING_REQUIRED) {
            return Err(CaptureError::CaptureDisabled);
        }
        let region = self.checked_region(context)?;
        let request = CaptureRequest {
            size: self.config.content_size,
            region,
        };
        let frame = capture
            .capture_frame(&request)
            .map_err(|err| CaptureError::Capture(Box::new(err)))?;
        cropper
            .crop(&frame, &region)
            .map_err(|err| CaptureError::Crop(Box::new(err)))
    }

    /// Crops already encoded content to the visible region.
    ///
    /// For static bitmaps no frame capture is needed.
    pub fn crop_content<B: CropBackend>(
        &self,
        context: &CaptureContext,
        image: &[u8],
        cropper: &mut B,
    ) -> Result<Vec<u8>, CaptureError> {
        let region = self.checked_region(context)?;
        cropper
            .crop(image, &region)
            .map_err(|err| CaptureError::Crop(Box::new(err)))
    }

    fn checked_region(&self, context: &CaptureContext) -> Result<CropRegion, CaptureError> {
        if self.lifecycle != Lifecycle::Mounted {
            return Err(CaptureError::NotMounted);
        }
        let region = self.current_crop_region(context);
        if region.is_empty() {
            return Err(CaptureError::EmptyRegion);
        }
        Ok(region)
    }

    fn advance(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn sync_animating(&mut self) {
        self.state.set_animating(self.animations.is_animating());
    }

    fn report_if_settled(&mut self, out: &mut EditorEvents) {
        if !self.animations.is_animating() {
            self.state.set_animating(false);
            out.push(EditorEvent::Settled);
        }
    }
}

fn timing(settle: SettleTiming) -> (u64, Easing) {
    (
        settle.duration_ms,
        Easing::Elastic {
            bounciness: settle.bounciness,
        },
    )
}
