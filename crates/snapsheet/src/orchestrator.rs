//! Starting, cancelling and completing the single in-flight transition.

use snapsheet_core::{AnimationSpec, Transition};

use crate::events::SheetEvent;
use crate::state::SheetCore;
use crate::types::{AnimationSource, AnimationState};

impl SheetCore {
    /// Shared guard for anything that moves the sheet.
    fn accepts_target(&self, target: Option<f32>) -> Option<f32> {
        let Some(target) = target else {
            log::trace!("no target; ignoring");
            return None;
        };
        if target == self.position.get() {
            log::trace!("already at {target}");
            return None;
        }
        if self.is_running() && self.next_position.get() == Some(target) {
            log::trace!("already animating to {target}");
            return None;
        }
        if self.is_forced_closing && target != self.closed_position() {
            log::debug!("forced close in flight; rejecting {target}");
            return None;
        }
        Some(target)
    }

    /// Index of `target` among the snap points, or `-1`.
    fn target_index(&self, target: f32) -> i32 {
        self.snap_points
            .peek()
            .index_of(target)
            .map_or(-1, |i| i as i32)
    }

    pub(crate) fn animate_to_position(
        &mut self,
        target: Option<f32>,
        source: AnimationSource,
        velocity: f32,
        spec: Option<AnimationSpec>,
    ) {
        let Some(target) = self.accepts_target(target) else {
            return;
        };

        // Replacing the transition is a cancel, not a stop: forced close survives.
        self.transition = None;

        let index = self.target_index(target);
        self.set_animation(AnimationState::Running, source, Some((target, index)));

        let is_closing = target == self.closed_position();
        let from_index = self.current_index.get();
        if (index != -1 || is_closing) && index != from_index {
            self.events.post(SheetEvent::Animate {
                from_index,
                to_index: index,
            });
        }

        let spec = spec.unwrap_or_else(|| self.config.animation_spec());
        log::debug!(
            "animating {} -> {target} (index {index}, {source:?})",
            self.position.get()
        );
        if spec.is_immediate() {
            self.set_position(target);
            self.complete_animation();
            return;
        }
        self.transition = Some(Transition::new(
            self.position.get(),
            target,
            velocity,
            spec,
            self.clock.now(),
        ));
    }

    pub(crate) fn set_to_position(&mut self, target: Option<f32>) {
        let Some(target) = self.accepts_target(target) else {
            return;
        };
        self.stop_animation();
        self.set_position(target);
    }

    pub(crate) fn stop_animation(&mut self) {
        self.transition = None;
        self.is_forced_closing = false;
        self.set_animation(AnimationState::Stopped, AnimationSource::None, None);
    }

    fn complete_animation(&mut self) {
        log::trace!("animation finished at {}", self.position.get());
        self.stop_animation();
    }

    /// Sample the in-flight transition; returns `true` while it keeps running.
    pub(crate) fn advance(&mut self) -> bool {
        let now = self.clock.now();
        let Some(progress) = self.transition.as_mut().map(|t| t.sample(now)) else {
            return false;
        };
        self.set_position(progress.value());
        if progress.is_finished() {
            self.complete_animation();
            return false;
        }
        true
    }
}
