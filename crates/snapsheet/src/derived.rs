//! Pure values computed from [`SheetCore`] on demand.
//!
//! Nothing here is cached: each accessor re-reads the primitives it needs, so a
//! derived value can never be stale relative to the state it came from.

use crate::snap_points::SnapPoints;
use crate::state::SheetCore;
use crate::types::{
    AnimationSource, KeyboardBehavior, KeyboardInputMode, KeyboardState, ScrollableLockState,
    SheetState,
};

/// Inputs to the sheet-state guard list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetStateInput {
    pub position: f32,
    pub closed_position: f32,
    /// Highest snap point, once normalized.
    pub extended_position: Option<f32>,
    /// Keyboard-lifted extended position, only while an interactive keyboard
    /// holds the sheet in a temporary position.
    pub keyboard_extended_position: Option<f32>,
}

type StateGuard = (fn(&SheetStateInput) -> bool, SheetState);

fn is_closed(i: &SheetStateInput) -> bool {
    i.position >= i.closed_position
}

fn is_at_extended(i: &SheetStateInput) -> bool {
    i.extended_position == Some(i.position)
}

fn is_at_keyboard_extended(i: &SheetStateInput) -> bool {
    i.keyboard_extended_position == Some(i.position)
}

fn is_at_top(i: &SheetStateInput) -> bool {
    i.position == 0.0
}

fn is_above_extended(i: &SheetStateInput) -> bool {
    i.extended_position.is_some_and(|e| i.position < e)
}

const SHEET_STATE_GUARDS: [StateGuard; 5] = [
    (is_closed, SheetState::Closed),
    (is_at_extended, SheetState::Extended),
    (is_at_keyboard_extended, SheetState::Extended),
    (is_at_top, SheetState::FillParent),
    (is_above_extended, SheetState::OverExtended),
];

pub fn sheet_state(input: &SheetStateInput) -> SheetState {
    SHEET_STATE_GUARDS
        .iter()
        .find(|(matches, _)| matches(input))
        .map_or(SheetState::Opened, |(_, state)| *state)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollLockInput {
    pub override_state: Option<ScrollableLockState>,
    pub sheet_state: SheetState,
    pub keyboard_state: KeyboardState,
    pub running: bool,
}

pub fn scrollable_lock_state(input: &ScrollLockInput) -> ScrollableLockState {
    if let Some(state) = input.override_state {
        return state;
    }
    if matches!(
        input.sheet_state,
        SheetState::FillParent | SheetState::Extended
    ) {
        return ScrollableLockState::Unlocked;
    }
    if input.keyboard_state == KeyboardState::Shown && input.running {
        return ScrollableLockState::Unlocked;
    }
    ScrollableLockState::Locked
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentHeightInput {
    pub container_height: f32,
    pub sheet_height: f32,
    pub handle_height: f32,
    pub keyboard_behavior: KeyboardBehavior,
    pub keyboard_state: KeyboardState,
    pub keyboard_height_in_container: f32,
    pub is_in_temporary_position: bool,
}

pub fn max_content_height(input: &ContentHeightInput) -> f32 {
    let shown = input.keyboard_state == KeyboardState::Shown;
    let keyboard = if shown {
        input.keyboard_height_in_container
    } else {
        0.0
    };
    let base = input.sheet_height - input.handle_height;
    let full = input.container_height - input.handle_height - keyboard;

    let height = match input.keyboard_behavior {
        KeyboardBehavior::Extend if shown => base - input.keyboard_height_in_container,
        KeyboardBehavior::FillParent if input.is_in_temporary_position => full,
        KeyboardBehavior::Interactive if input.is_in_temporary_position => {
            let lifted = base + input.keyboard_height_in_container;
            if lifted > full { full } else { lifted }
        }
        _ => base,
    };
    height.max(0.0)
}

/// Piecewise-linear map from `position` to index.
///
/// `knots` must be ascending; `values` are the indices at each knot. Positions
/// outside the knot range clamp to the end values, and a position exactly on a
/// knot returns that knot's value with no rounding residue.
pub fn interpolate_index(position: f32, knots: &[f32], values: &[f32]) -> f32 {
    debug_assert_eq!(knots.len(), values.len());
    let (Some(first), Some(last)) = (knots.first(), knots.last()) else {
        return -1.0;
    };
    if let Some(i) = knots.iter().position(|k| *k == position) {
        return values[i];
    }
    if position <= *first {
        return values[0];
    }
    if position >= *last {
        return values[values.len() - 1];
    }
    for (k, v) in knots.windows(2).zip(values.windows(2)) {
        let (k0, k1) = (k[0], k[1]);
        if position > k0 && position < k1 {
            let t = (position - k0) / (k1 - k0);
            return v[0] + (v[1] - v[0]) * t;
        }
    }
    values[values.len() - 1]
}

/// Index interpolated over the snap points plus the closed position.
pub fn raw_fractional_index(position: f32, snap_points: &SnapPoints, closed_position: f32) -> f32 {
    if !snap_points.is_normalized() {
        return -1.0;
    }
    let mut knots: Vec<f32> = snap_points.as_slice().iter().rev().copied().collect();
    let mut values: Vec<f32> = (0..snap_points.len()).rev().map(|i| i as f32).collect();
    knots.push(closed_position);
    values.push(-1.0);
    interpolate_index(position, &knots, &values)
}

/// `|keyboard - bottom inset|`, with the inset measured against the container
/// offset for sheets that float above the bottom edge.
pub fn keyboard_height_in_container(
    keyboard_height: f32,
    container_bottom: f32,
    bottom_inset: f32,
    floating: bool,
) -> f32 {
    let inset = if floating {
        (bottom_inset - container_bottom).abs()
    } else {
        container_bottom
    };
    (keyboard_height - inset).abs()
}

impl SheetCore {
    pub fn container_height(&self) -> Option<f32> {
        self.container_height.get()
    }

    pub fn closed_position(&self) -> f32 {
        closed_position_for(self.container_height.get(), &self.config)
    }

    pub fn highest_snap_point(&self) -> Option<f32> {
        self.snap_points.peek().highest()
    }

    pub fn sheet_height(&self) -> f32 {
        match (self.container_height.get(), self.highest_snap_point()) {
            (Some(container), Some(highest)) => (container - highest).max(0.0),
            _ => 0.0,
        }
    }

    pub fn keyboard_height_in_container(&self) -> f32 {
        self.keyboard_height_in_container.get()
    }

    fn keyboard_extended_position(&self) -> Option<f32> {
        if self.config.keyboard_behavior != KeyboardBehavior::Interactive
            || !self.is_in_temporary_position.get()
        {
            return None;
        }
        self.highest_snap_point()
            .map(|h| (h - self.keyboard_height_in_container.get()).max(0.0))
    }

    pub fn sheet_state(&self) -> SheetState {
        sheet_state(&SheetStateInput {
            position: self.position.get(),
            closed_position: self.closed_position(),
            extended_position: self.highest_snap_point(),
            keyboard_extended_position: self.keyboard_extended_position(),
        })
    }

    pub fn scrollable_lock_state(&self) -> ScrollableLockState {
        scrollable_lock_state(&ScrollLockInput {
            override_state: self.scrollable_override.get(),
            sheet_state: self.sheet_state(),
            keyboard_state: self.keyboard_state.get(),
            running: self.is_running(),
        })
    }

    pub fn max_content_height(&self) -> f32 {
        max_content_height(&ContentHeightInput {
            container_height: self.container_height.get().unwrap_or(0.0),
            sheet_height: self.sheet_height(),
            handle_height: self.handle_height.get().unwrap_or(0.0),
            keyboard_behavior: self.config.keyboard_behavior,
            keyboard_state: self.keyboard_state.get(),
            keyboard_height_in_container: self.keyboard_height_in_container.get(),
            is_in_temporary_position: self.is_in_temporary_position.get(),
        })
    }

    pub fn fractional_index(&self) -> f32 {
        if !self.layout_calculated.get() {
            return -1.0;
        }
        let raw = raw_fractional_index(
            self.position.get(),
            self.snap_points.peek(),
            self.closed_position(),
        );
        if !self.is_running() {
            return raw;
        }
        match self.animation_source.get() {
            AnimationSource::Keyboard
                if self.is_in_temporary_position.get()
                    && self.config.keyboard_input_mode == KeyboardInputMode::AdjustResize =>
            {
                raw.max(self.current_index.get() as f32)
            }
            AnimationSource::SnapPointChange => self
                .next_position_index
                .get()
                .map_or(raw, |index| index as f32),
            _ => raw,
        }
    }

    /// Translation that pins a footer to the visible bottom of the sheet.
    pub fn footer_offset(&self) -> f32 {
        let container = self.container_height.get().unwrap_or(0.0);
        let keyboard = if self.keyboard_state.get() == KeyboardState::Shown {
            self.keyboard_height_in_container.get()
        } else {
            0.0
        };
        (container - self.position.get()).max(0.0)
            - keyboard
            - self.footer_height.get()
            - self.handle_height.get().unwrap_or(0.0)
    }
}

pub(crate) fn closed_position_for(
    container_height: Option<f32>,
    config: &crate::config::SheetConfig,
) -> f32 {
    let container = container_height.unwrap_or(0.0);
    if config.is_floating() {
        container + config.bottom_inset
    } else {
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(position: f32) -> SheetState {
        sheet_state(&SheetStateInput {
            position,
            closed_position: 800.0,
            extended_position: Some(80.0),
            keyboard_extended_position: None,
        })
    }

    #[test]
    fn sheet_state_guards_in_order() {
        assert_eq!(state_at(800.0), SheetState::Closed);
        assert_eq!(state_at(900.0), SheetState::Closed);
        assert_eq!(state_at(80.0), SheetState::Extended);
        assert_eq!(state_at(0.0), SheetState::FillParent);
        assert_eq!(state_at(40.0), SheetState::OverExtended);
        assert_eq!(state_at(400.0), SheetState::Opened);
    }

    #[test]
    fn keyboard_lift_counts_as_extended() {
        let input = SheetStateInput {
            position: 100.0,
            closed_position: 800.0,
            extended_position: Some(400.0),
            keyboard_extended_position: Some(100.0),
        };
        assert_eq!(sheet_state(&input), SheetState::Extended);
    }

    #[test]
    fn top_snap_point_is_extended_not_fill_parent() {
        let input = SheetStateInput {
            position: 0.0,
            closed_position: 800.0,
            extended_position: Some(0.0),
            keyboard_extended_position: None,
        };
        assert_eq!(sheet_state(&input), SheetState::Extended);
    }

    #[test]
    fn scroll_lock() {
        let mut input = ScrollLockInput {
            override_state: None,
            sheet_state: SheetState::Opened,
            keyboard_state: KeyboardState::Hidden,
            running: false,
        };
        assert_eq!(scrollable_lock_state(&input), ScrollableLockState::Locked);

        input.sheet_state = SheetState::Extended;
        assert_eq!(scrollable_lock_state(&input), ScrollableLockState::Unlocked);

        input.override_state = Some(ScrollableLockState::Locked);
        assert_eq!(scrollable_lock_state(&input), ScrollableLockState::Locked);

        input.override_state = None;
        input.sheet_state = SheetState::Opened;
        input.keyboard_state = KeyboardState::Shown;
        input.running = true;
        assert_eq!(scrollable_lock_state(&input), ScrollableLockState::Unlocked);
    }

    #[test]
    fn knots_are_exact() {
        let points = SnapPoints::from_offsets([600.0, 333.3, 80.0]);
        for (i, offset) in points.as_slice().iter().enumerate() {
            assert_eq!(raw_fractional_index(*offset, &points, 800.0), i as f32);
        }
        assert_eq!(raw_fractional_index(800.0, &points, 800.0), -1.0);
    }

    #[test]
    fn index_interpolates_between_knots() {
        let points = SnapPoints::from_offsets([400.0, 80.0]);
        assert_eq!(raw_fractional_index(600.0, &points, 800.0), -0.5);
        assert_eq!(raw_fractional_index(240.0, &points, 800.0), 0.5);
        // Clamped at both ends.
        assert_eq!(raw_fractional_index(0.0, &points, 800.0), 1.0);
        assert_eq!(raw_fractional_index(1200.0, &points, 800.0), -1.0);
        assert_eq!(raw_fractional_index(400.0, &SnapPoints::pending(), 800.0), -1.0);
    }

    #[test]
    fn content_height_per_keyboard_behavior() {
        let base = ContentHeightInput {
            container_height: 800.0,
            sheet_height: 400.0,
            handle_height: 24.0,
            keyboard_behavior: KeyboardBehavior::Interactive,
            keyboard_state: KeyboardState::Hidden,
            keyboard_height_in_container: 0.0,
            is_in_temporary_position: false,
        };
        assert_eq!(max_content_height(&base), 376.0);

        let extend = ContentHeightInput {
            keyboard_behavior: KeyboardBehavior::Extend,
            keyboard_state: KeyboardState::Shown,
            keyboard_height_in_container: 300.0,
            ..base
        };
        assert_eq!(max_content_height(&extend), 76.0);

        let fill = ContentHeightInput {
            keyboard_behavior: KeyboardBehavior::FillParent,
            keyboard_state: KeyboardState::Shown,
            keyboard_height_in_container: 300.0,
            is_in_temporary_position: true,
            ..base
        };
        assert_eq!(max_content_height(&fill), 476.0);

        let interactive = ContentHeightInput {
            keyboard_state: KeyboardState::Shown,
            keyboard_height_in_container: 300.0,
            is_in_temporary_position: true,
            ..base
        };
        // 376 + 300 overflows 800 - 24 - 300.
        assert_eq!(max_content_height(&interactive), 476.0);

        let degenerate = ContentHeightInput {
            sheet_height: 10.0,
            ..base
        };
        assert_eq!(max_content_height(&degenerate), 0.0);
    }

    #[test]
    fn keyboard_geometry() {
        assert_eq!(keyboard_height_in_container(300.0, 34.0, 0.0, false), 266.0);
        assert_eq!(keyboard_height_in_container(300.0, 0.0, 20.0, true), 280.0);
        assert_eq!(keyboard_height_in_container(300.0, 34.0, 20.0, true), 286.0);
    }
}
