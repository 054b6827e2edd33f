//! Drag bridge for hosts that run their own gesture recognizer.
//!
//! The host reports a drag as begin / move / end. The engine owns the offset
//! while a drag is active and picks the snap point to release onto.

use crate::sheet::Sheet;
use crate::types::{AnimationSource, GestureSource, GestureState};

/// Seconds of travel added to the release position when choosing a snap point.
const VELOCITY_PROJECTION: f32 = 0.2;

impl Sheet {
    pub fn begin_drag(&mut self, source: GestureSource) {
        if self.core.is_forced_closing() || !self.core.is_layout_calculated() {
            log::debug!("drag from {source:?} ignored");
            return;
        }
        self.drag_source = Some(source);
        self.core.set_gesture_state(source, GestureState::Began);
        self.core.stop_animation();
        self.flush();
    }

    /// Move the sheet to a gesture-translated offset.
    pub fn drag_to(&mut self, position: f32) {
        let Some(source) = self.drag_source else {
            return;
        };
        let (lower, upper) = self.drag_bounds();
        self.core.set_gesture_state(source, GestureState::Active);
        self.core.set_position(position.clamp(lower, upper));
        self.flush();
    }

    /// Release the drag with a velocity in points per second, positive downward.
    pub fn end_drag(&mut self, velocity: f32) {
        let Some(source) = self.drag_source.take() else {
            return;
        };
        self.core.set_gesture_state(source, GestureState::End);

        let projected = self.core.position() + VELOCITY_PROJECTION * velocity;
        let target = self.release_candidates().into_iter().min_by(|a, b| {
            (a - projected).abs().total_cmp(&(b - projected).abs())
        });
        log::debug!("drag released at {}, projected {projected}", self.core.position());

        self.core.set_temporary(false);
        self.core
            .animate_to_position(target, AnimationSource::Gesture, velocity, None);
        self.flush();
    }

    fn drag_bounds(&self) -> (f32, f32) {
        let core = &self.core;
        let points = core.snap_points();
        let lower = if core.config.enable_over_drag {
            0.0
        } else {
            points.highest().unwrap_or(0.0)
        };
        let upper = if core.config.enable_pan_down_to_close {
            core.closed_position()
        } else {
            points.get(0).unwrap_or_else(|| core.closed_position())
        };
        (lower, upper.max(lower))
    }

    fn release_candidates(&self) -> Vec<f32> {
        let core = &self.core;
        let mut candidates = core.snap_points().as_slice().to_vec();
        if !core.snap_points().is_normalized() {
            candidates.clear();
        }
        if core.config.enable_pan_down_to_close {
            candidates.push(core.closed_position());
        }
        candidates
    }
}
