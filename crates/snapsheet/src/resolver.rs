//! Picks the offset the sheet should move to next, given keyboard and gesture
//! context. Rules are tried in order and the first one that applies wins.

use crate::snap_points::SnapPoints;
use crate::state::SheetCore;
use crate::types::{KeyboardBehavior, KeyboardBlurBehavior, KeyboardState};

/// What to do with the temporary-position flag alongside a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporaryPosition {
    Keep,
    Enter,
    Leave,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub target: Option<f32>,
    pub temporary: TemporaryPosition,
}

impl Resolution {
    fn keep(target: Option<f32>) -> Self {
        Self {
            target,
            temporary: TemporaryPosition::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResolverInput<'a> {
    pub snap_points: &'a SnapPoints,
    pub position: f32,
    pub current_index: i32,
    pub provided_index: i32,
    pub keyboard_state: KeyboardState,
    /// Keyboard went from shown to hidden since it was last observed.
    pub keyboard_just_hidden: bool,
    pub keyboard_height_in_container: f32,
    pub keyboard_behavior: KeyboardBehavior,
    pub keyboard_blur_behavior: KeyboardBlurBehavior,
    pub has_active_gesture: bool,
    pub is_in_temporary_position: bool,
    pub is_mounted: bool,
}

impl ResolverInput<'_> {
    fn shown_with(&self, behavior: KeyboardBehavior) -> bool {
        self.keyboard_state == KeyboardState::Shown && self.keyboard_behavior == behavior
    }
}

type Rule = fn(&ResolverInput<'_>) -> Option<Resolution>;

fn restore_after_keyboard(i: &ResolverInput<'_>) -> Option<Resolution> {
    let restore = i.keyboard_just_hidden
        && i.keyboard_blur_behavior == KeyboardBlurBehavior::Restore
        && !i.has_active_gesture;
    restore.then(|| Resolution {
        target: i.snap_points.get(i.current_index),
        temporary: TemporaryPosition::Leave,
    })
}

fn extend_for_keyboard(i: &ResolverInput<'_>) -> Option<Resolution> {
    i.shown_with(KeyboardBehavior::Extend)
        .then(|| Resolution::keep(i.snap_points.highest()))
}

fn fill_parent_for_keyboard(i: &ResolverInput<'_>) -> Option<Resolution> {
    i.shown_with(KeyboardBehavior::FillParent).then_some(Resolution {
        target: Some(0.0),
        temporary: TemporaryPosition::Enter,
    })
}

fn lift_above_keyboard(i: &ResolverInput<'_>) -> Option<Resolution> {
    i.shown_with(KeyboardBehavior::Interactive).then(|| Resolution {
        target: i
            .snap_points
            .highest()
            .map(|h| (h - i.keyboard_height_in_container).max(0.0)),
        temporary: TemporaryPosition::Enter,
    })
}

fn hold_temporary(i: &ResolverInput<'_>) -> Option<Resolution> {
    i.is_in_temporary_position
        .then(|| Resolution::keep(Some(i.position)))
}

fn initial_index(i: &ResolverInput<'_>) -> Option<Resolution> {
    (!i.is_mounted).then(|| Resolution::keep(i.snap_points.get(i.provided_index)))
}

fn current_index(i: &ResolverInput<'_>) -> Option<Resolution> {
    Some(Resolution::keep(i.snap_points.get(i.current_index)))
}

const RULES: [Rule; 7] = [
    restore_after_keyboard,
    extend_for_keyboard,
    fill_parent_for_keyboard,
    lift_above_keyboard,
    hold_temporary,
    initial_index,
    current_index,
];

pub fn resolve(input: &ResolverInput<'_>) -> Resolution {
    RULES
        .iter()
        .find_map(|rule| rule(input))
        .unwrap_or(Resolution::keep(None))
}

impl SheetCore {
    /// Resolve the next target and apply the temporary-position instruction
    /// that came with it.
    pub(crate) fn resolve_next_position(&mut self, keyboard_just_hidden: bool) -> Option<f32> {
        let resolution = resolve(&ResolverInput {
            snap_points: self.snap_points.peek(),
            position: self.position.get(),
            current_index: self.current_index.get(),
            provided_index: self.provided_index,
            keyboard_state: self.keyboard_state.get(),
            keyboard_just_hidden,
            keyboard_height_in_container: self.keyboard_height_in_container.get(),
            keyboard_behavior: self.config.keyboard_behavior,
            keyboard_blur_behavior: self.config.keyboard_blur_behavior,
            has_active_gesture: self.has_active_gesture(),
            is_in_temporary_position: self.is_in_temporary_position.get(),
            is_mounted: self.is_animated_on_mount,
        });
        match resolution.temporary {
            TemporaryPosition::Enter => self.set_temporary(true),
            TemporaryPosition::Leave => self.set_temporary(false),
            TemporaryPosition::Keep => {}
        }
        log::trace!("resolved next position {:?}", resolution.target);
        resolution.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(points: &SnapPoints) -> ResolverInput<'_> {
        ResolverInput {
            snap_points: points,
            position: 400.0,
            current_index: 0,
            provided_index: 1,
            keyboard_state: KeyboardState::Hidden,
            keyboard_just_hidden: false,
            keyboard_height_in_container: 0.0,
            keyboard_behavior: KeyboardBehavior::Interactive,
            keyboard_blur_behavior: KeyboardBlurBehavior::None,
            has_active_gesture: false,
            is_in_temporary_position: false,
            is_mounted: true,
        }
    }

    #[test]
    fn falls_back_to_current_index() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        assert_eq!(resolve(&input(&points)), Resolution::keep(Some(400.0)));
    }

    #[test]
    fn unmounted_uses_provided_index() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        let i = ResolverInput {
            is_mounted: false,
            ..input(&points)
        };
        assert_eq!(resolve(&i).target, Some(80.0));
    }

    #[test]
    fn closed_index_has_no_target() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        let i = ResolverInput {
            current_index: -1,
            ..input(&points)
        };
        assert_eq!(resolve(&i).target, None);
    }

    #[test]
    fn keyboard_rules() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        let shown = ResolverInput {
            keyboard_state: KeyboardState::Shown,
            keyboard_height_in_container: 300.0,
            ..input(&points)
        };

        let lifted = resolve(&shown);
        assert_eq!(lifted.target, Some(0.0));
        assert_eq!(lifted.temporary, TemporaryPosition::Enter);

        let extend = ResolverInput {
            keyboard_behavior: KeyboardBehavior::Extend,
            ..shown
        };
        assert_eq!(resolve(&extend), Resolution::keep(Some(80.0)));

        let fill = ResolverInput {
            keyboard_behavior: KeyboardBehavior::FillParent,
            ..shown
        };
        assert_eq!(resolve(&fill).target, Some(0.0));
        assert_eq!(resolve(&fill).temporary, TemporaryPosition::Enter);
    }

    #[test]
    fn restore_needs_release_and_no_active_gesture() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        let hidden = ResolverInput {
            keyboard_just_hidden: true,
            keyboard_blur_behavior: KeyboardBlurBehavior::Restore,
            is_in_temporary_position: true,
            position: 0.0,
            ..input(&points)
        };
        assert_eq!(
            resolve(&hidden),
            Resolution {
                target: Some(400.0),
                temporary: TemporaryPosition::Leave,
            }
        );

        let dragging = ResolverInput {
            has_active_gesture: true,
            ..hidden
        };
        // Falls through to holding the temporary position.
        assert_eq!(resolve(&dragging), Resolution::keep(Some(0.0)));
    }
}
