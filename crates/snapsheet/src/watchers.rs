//! Reactions that keep the sheet where it belongs as inputs change.
//!
//! Each watcher remembers what it last observed so it can tell a real change
//! from a pass that merely touched one of its dependency bits. They are
//! installed in a fixed order: snap points, keyboard, mount, settle.

use snapsheet_core::{AnimationSpec, Graph};

use crate::derived;
use crate::events::SheetEvent;
use crate::snap_points::SnapPoints;
use crate::state::{Deps, SheetCore};
use crate::types::{
    AnimationSource, AnimationState, KeyboardBehavior, KeyboardBlurBehavior, KeyboardInputMode,
    KeyboardState, Platform,
};

pub(crate) fn install(graph: &mut Graph<SheetCore, Deps>, core: &SheetCore) {
    let mut snap = SnapPointsWatch::new(core);
    graph.add(
        "snap-points",
        Deps::SNAP_POINTS | Deps::CONTAINER,
        move |c| snap.run(c),
    );

    let mut keyboard = KeyboardWatch::new(core);
    graph.add(
        "keyboard",
        Deps::KEYBOARD | Deps::CONTAINER,
        move |c| keyboard.run(c),
    );

    graph.add("mount", Deps::LAYOUT, mount);

    graph.add(
        "settle",
        Deps::POSITION
            | Deps::ANIMATION
            | Deps::GESTURE
            | Deps::SNAP_POINTS
            | Deps::CONTAINER
            | Deps::TEMPORARY,
        settle,
    );
}

struct SnapPointsWatch {
    points: SnapPoints,
    container_height: Option<f32>,
    closed_position: f32,
}

impl SnapPointsWatch {
    fn new(core: &SheetCore) -> Self {
        Self {
            points: core.snap_points().clone(),
            container_height: core.container_height(),
            closed_position: core.closed_position(),
        }
    }

    fn run(&mut self, core: &mut SheetCore) {
        let previous = std::mem::replace(self, Self::new(core));
        let container_changed = previous.container_height != self.container_height;

        // Closing toward an edge that just moved: jump straight to the new one.
        let is_closing = core.is_running()
            && core.next_position_index() == Some(-1)
            && core.next_position() == Some(previous.closed_position);
        if core.is_animated_on_mount && is_closing && container_changed {
            log::debug!("container resized while closing; snapping to new closed position");
            core.set_to_position(Some(self.closed_position));
            return;
        }

        if previous.points == self.points
            || !core.is_layout_calculated()
            || !core.is_animated_on_mount
        {
            return;
        }

        let current = core.current_index();
        // Temporary targets carry index -1 but are not closing.
        let heading_off_points = core.next_position_index() == Some(-1)
            && core.next_position() != Some(previous.closed_position);
        let in_flight = core
            .next_position_index()
            .filter(|next| core.is_running() && *next != current && !heading_off_points);

        let (target, source, spec) = if let Some(next) = in_flight {
            (core.index_position(next), AnimationSource::SnapPointChange, None)
        } else if current == -1 {
            (
                Some(core.closed_position()),
                AnimationSource::SnapPointChange,
                None,
            )
        } else if core.is_in_temporary_position() {
            (
                core.resolve_next_position(false),
                AnimationSource::SnapPointChange,
                None,
            )
        } else if container_changed {
            (
                core.index_position(current),
                AnimationSource::ContainerResize,
                Some(AnimationSpec::immediate()),
            )
        } else {
            (
                core.index_position(current),
                AnimationSource::SnapPointChange,
                None,
            )
        };
        log::debug!("snap points changed to {:?}", self.points.as_slice());
        core.animate_to_position(target, source, 0.0, spec);
    }
}

struct KeyboardWatch {
    state: KeyboardState,
    height: f32,
}

impl KeyboardWatch {
    fn new(core: &SheetCore) -> Self {
        Self {
            state: core.keyboard_state.get(),
            height: core.keyboard_height.get(),
        }
    }

    fn run(&mut self, core: &mut SheetCore) {
        let in_container = derived::keyboard_height_in_container(
            core.keyboard_height.get(),
            core.container_offset.get().bottom,
            core.config.bottom_inset,
            core.config.is_floating(),
        );
        core.set_keyboard_height_in_container(in_container);

        let state = core.keyboard_state.get();
        let height = core.keyboard_height.get();
        if state == self.state && height == self.height {
            return;
        }
        let just_hidden = self.state == KeyboardState::Shown && state == KeyboardState::Hidden;
        self.state = state;
        self.height = height;

        if core.has_engaged_gesture() || !core.is_animated_on_mount {
            return;
        }
        let config = &core.config;
        if state == KeyboardState::Hidden
            && config.keyboard_blur_behavior == KeyboardBlurBehavior::None
        {
            return;
        }
        if config.platform == Platform::Android
            && config.keyboard_behavior == KeyboardBehavior::Interactive
            && config.keyboard_input_mode == KeyboardInputMode::AdjustResize
        {
            log::trace!("keyboard handled by window resize");
            return;
        }

        let spec = core.keyboard_animation.spec();
        let target = core.resolve_next_position(just_hidden);
        log::debug!("keyboard {state:?} ({height}); moving to {target:?}");
        core.animate_to_position(target, AnimationSource::Keyboard, 0.0, Some(spec));
    }
}

fn mount(core: &mut SheetCore) {
    if core.is_animated_on_mount || !core.is_layout_calculated() {
        return;
    }
    let closed = core.closed_position();
    if core.position().is_infinite() {
        core.set_position(closed);
    }

    let target = if core.provided_index == -1 {
        Some(closed)
    } else {
        core.resolve_next_position(false)
    };
    log::debug!("mounting at {target:?}");
    if core.config.animate_on_mount {
        core.animate_to_position(target, AnimationSource::Mount, 0.0, None);
    } else {
        core.set_to_position(target);
    }
    core.is_animated_on_mount = true;
}

fn settle(core: &mut SheetCore) {
    if core.animation_state() != AnimationState::Stopped || core.has_active_gesture() {
        return;
    }
    let position = core.position();
    if core.next_position().is_some_and(|next| next != position) {
        return;
    }
    let fractional = core.fractional_index();
    if fractional.fract() != 0.0 {
        return;
    }
    let index = fractional as i32;
    if core.index_position(index) != Some(position) || index == core.current_index() {
        return;
    }

    log::debug!("settled at index {index} ({position})");
    core.commit_index(index);
    let kind = core.snap_points().kind_of(index);
    core.events.post(SheetEvent::Change {
        index,
        position,
        kind,
    });
    if index == -1 {
        core.events.post(SheetEvent::Close);
    }
}
