//! The owned engine state.
//!
//! Every primitive value lives in one [`SheetCore`]. Writes go through the
//! setters below, which record the matching [`Deps`] bit so the reaction graph
//! knows which watchers to re-run.

use std::sync::Arc;

use bitflags::bitflags;
use snapsheet_core::reactive::Tracked;
use snapsheet_core::{Clock, Insets, Outbox, Signal, Transition};

use crate::config::{KeyboardAnimation, SheetConfig, SnapPoint};
use crate::events::SheetEvent;
use crate::snap_points::{self, DynamicSizing, Measurements, SnapPoints};
use crate::types::{
    AnimationSource, AnimationState, GestureSource, GestureState, KeyboardState,
    ScrollableLockState,
};

bitflags! {
    /// Dependency bits written by [`SheetCore`] setters.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Deps: u32 {
        const CONTAINER = 1 << 0;
        const CONTENT = 1 << 1;
        const HANDLE = 1 << 2;
        const FOOTER = 1 << 3;
        const KEYBOARD = 1 << 4;
        const GESTURE = 1 << 5;
        const SCROLLABLE = 1 << 6;
        const SNAP_POINTS = 1 << 7;
        const LAYOUT = 1 << 8;
        const POSITION = 1 << 9;
        const ANIMATION = 1 << 10;
        const TEMPORARY = 1 << 11;
        const INDEX = 1 << 12;
    }
}

/// Position before the sheet has ever been placed.
pub const UNPLACED_POSITION: f32 = f32::INFINITY;

pub struct SheetCore {
    pub(crate) config: SheetConfig,
    pub(crate) snap_specs: Vec<SnapPoint>,
    /// Index used by the mount reaction.
    pub(crate) provided_index: i32,

    pub(crate) container_height: Signal<Option<f32>>,
    pub(crate) container_offset: Signal<Insets>,
    pub(crate) content_height: Signal<Option<f32>>,
    pub(crate) handle_height: Signal<Option<f32>>,
    pub(crate) footer_height: Signal<f32>,

    pub(crate) keyboard_state: Signal<KeyboardState>,
    pub(crate) keyboard_height: Signal<f32>,
    pub(crate) keyboard_height_in_container: Signal<f32>,
    pub(crate) keyboard_animation: KeyboardAnimation,

    pub(crate) content_gesture: Signal<GestureState>,
    pub(crate) handle_gesture: Signal<GestureState>,
    pub(crate) scrollable_override: Signal<Option<ScrollableLockState>>,

    pub(crate) snap_points: Signal<SnapPoints>,
    pub(crate) layout_calculated: Signal<bool>,

    pub(crate) position: Signal<f32>,
    pub(crate) current_index: Signal<i32>,
    pub(crate) animation_state: Signal<AnimationState>,
    pub(crate) animation_source: Signal<AnimationSource>,
    pub(crate) next_position: Signal<Option<f32>>,
    pub(crate) next_position_index: Signal<Option<i32>>,
    pub(crate) transition: Option<Transition>,

    pub(crate) is_in_temporary_position: Signal<bool>,
    pub(crate) is_forced_closing: bool,
    pub(crate) is_animated_on_mount: bool,

    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) events: Outbox<SheetEvent>,
    dirty: Deps,
}

impl Tracked<Deps> for SheetCore {
    fn take_dirty(&mut self) -> Deps {
        std::mem::take(&mut self.dirty)
    }
}

impl SheetCore {
    pub(crate) fn new(config: SheetConfig, clock: Arc<dyn Clock>, events: Outbox<SheetEvent>) -> Self {
        let handle_height = if config.has_handle { None } else { Some(0.0) };
        let current_index = if config.animate_on_mount { -1 } else { config.index };
        let mut core = Self {
            snap_specs: config.snap_points.clone(),
            provided_index: config.index,
            config,
            container_height: Signal::new(None),
            container_offset: Signal::new(Insets::ZERO),
            content_height: Signal::new(None),
            handle_height: Signal::new(handle_height),
            footer_height: Signal::new(0.0),
            keyboard_state: Signal::new(KeyboardState::Hidden),
            keyboard_height: Signal::new(0.0),
            keyboard_height_in_container: Signal::new(0.0),
            keyboard_animation: KeyboardAnimation::default(),
            content_gesture: Signal::new(GestureState::Undetermined),
            handle_gesture: Signal::new(GestureState::Undetermined),
            scrollable_override: Signal::new(None),
            snap_points: Signal::new(SnapPoints::pending()),
            layout_calculated: Signal::new(false),
            position: Signal::new(UNPLACED_POSITION),
            current_index: Signal::new(current_index),
            animation_state: Signal::new(AnimationState::Undetermined),
            animation_source: Signal::new(AnimationSource::None),
            next_position: Signal::new(None),
            next_position_index: Signal::new(None),
            transition: None,
            is_in_temporary_position: Signal::new(false),
            is_forced_closing: false,
            is_animated_on_mount: false,
            clock,
            events,
            dirty: Deps::empty(),
        };
        core.refresh_snap_points();
        core
    }

    fn touch(&mut self, changed: bool, dep: Deps) {
        if changed {
            self.dirty |= dep;
        }
    }

    // Measured inputs. Anything feeding the normalizer re-runs it right away so
    // snap points never lag behind the extents they were derived from.

    pub(crate) fn set_container_height(&mut self, height: f32) {
        let changed = self.container_height.set(Some(height.max(0.0)));
        self.touch(changed, Deps::CONTAINER);
        if changed {
            self.refresh_snap_points();
        }
    }

    pub(crate) fn set_container_offset(&mut self, offset: Insets) {
        let changed = self.container_offset.set(offset);
        self.touch(changed, Deps::CONTAINER);
    }

    pub(crate) fn set_content_height(&mut self, height: f32) {
        let changed = self.content_height.set(Some(height.max(0.0)));
        self.touch(changed, Deps::CONTENT);
        if changed {
            self.refresh_snap_points();
        }
    }

    pub(crate) fn set_handle_height(&mut self, height: f32) {
        let height = if self.config.has_handle {
            height.max(0.0)
        } else {
            0.0
        };
        let changed = self.handle_height.set(Some(height));
        self.touch(changed, Deps::HANDLE);
        if changed {
            self.refresh_snap_points();
        }
    }

    pub(crate) fn set_footer_height(&mut self, height: f32) {
        let changed = self.footer_height.set(height.max(0.0));
        self.touch(changed, Deps::FOOTER);
    }

    pub(crate) fn set_snap_specs(&mut self, specs: Vec<SnapPoint>) {
        if self.snap_specs == specs {
            return;
        }
        self.snap_specs = specs;
        self.refresh_snap_points();
    }

    pub(crate) fn set_keyboard(&mut self, state: KeyboardState, height: f32) {
        let a = self.keyboard_state.set(state);
        let b = self.keyboard_height.set(height.max(0.0));
        self.touch(a || b, Deps::KEYBOARD);
    }

    pub(crate) fn set_keyboard_height_in_container(&mut self, height: f32) {
        let changed = self.keyboard_height_in_container.set(height);
        self.touch(changed, Deps::KEYBOARD);
    }

    pub(crate) fn set_gesture_state(&mut self, source: GestureSource, state: GestureState) {
        let changed = match source {
            GestureSource::Content => self.content_gesture.set(state),
            GestureSource::Handle => self.handle_gesture.set(state),
        };
        self.touch(changed, Deps::GESTURE);
    }

    pub(crate) fn set_scrollable_override(&mut self, state: Option<ScrollableLockState>) {
        let changed = self.scrollable_override.set(state);
        self.touch(changed, Deps::SCROLLABLE);
    }

    fn refresh_snap_points(&mut self) {
        let measurements = Measurements {
            container_height: self.container_height.get(),
            content_height: self.content_height.get(),
            handle_height: self.handle_height.get(),
        };
        let dynamic = DynamicSizing {
            enabled: self.config.enable_dynamic_sizing,
            max_content_size: self.config.max_dynamic_content_size,
        };
        let normalized = snap_points::normalize(&self.snap_specs, measurements, dynamic);
        let changed = self.snap_points.set(normalized);
        self.touch(changed, Deps::SNAP_POINTS);

        let calculated = self.container_height.peek().is_some()
            && self.handle_height.peek().is_some()
            && self.snap_points.peek().is_normalized();
        let changed = self.layout_calculated.set(calculated);
        self.touch(changed, Deps::LAYOUT);
    }

    // Engine-owned values.

    pub(crate) fn set_position(&mut self, position: f32) {
        let changed = self.position.set(position);
        self.touch(changed, Deps::POSITION);
    }

    pub(crate) fn set_temporary(&mut self, temporary: bool) {
        let changed = self.is_in_temporary_position.set(temporary);
        self.touch(changed, Deps::TEMPORARY);
    }

    pub(crate) fn commit_index(&mut self, index: i32) {
        let changed = self.current_index.set(index);
        self.touch(changed, Deps::INDEX);
    }

    pub(crate) fn set_animation(
        &mut self,
        state: AnimationState,
        source: AnimationSource,
        next: Option<(f32, i32)>,
    ) {
        let a = self.animation_state.set(state);
        let b = self.animation_source.set(source);
        let c = self.next_position.set(next.map(|(p, _)| p));
        let d = self.next_position_index.set(next.map(|(_, i)| i));
        self.touch(a || b || c || d, Deps::ANIMATION);
    }

    // Plain reads.

    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn current_index(&self) -> i32 {
        self.current_index.get()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation_state.get()
    }

    pub fn animation_source(&self) -> AnimationSource {
        self.animation_source.get()
    }

    pub fn next_position(&self) -> Option<f32> {
        self.next_position.get()
    }

    pub fn next_position_index(&self) -> Option<i32> {
        self.next_position_index.get()
    }

    pub fn snap_points(&self) -> &SnapPoints {
        self.snap_points.peek()
    }

    pub fn is_layout_calculated(&self) -> bool {
        self.layout_calculated.get()
    }

    pub fn is_in_temporary_position(&self) -> bool {
        self.is_in_temporary_position.get()
    }

    pub fn is_forced_closing(&self) -> bool {
        self.is_forced_closing
    }

    pub fn is_running(&self) -> bool {
        self.animation_state.get() == AnimationState::Running
    }

    /// A gesture has begun or is active on either the content or the handle.
    pub fn has_engaged_gesture(&self) -> bool {
        self.content_gesture.get().is_engaged() || self.handle_gesture.get().is_engaged()
    }

    /// Strictly `Active`; a gesture that only began does not count.
    pub fn has_active_gesture(&self) -> bool {
        self.content_gesture.get() == GestureState::Active
            || self.handle_gesture.get() == GestureState::Active
    }

    /// Last index the snap points will have once normalized. Before that it
    /// is estimated from the raw specs; a duplicate content point may still
    /// collapse the list by one.
    pub fn expected_last_index(&self) -> i32 {
        let points = self.snap_points.peek();
        if points.is_normalized() {
            return points.last_index();
        }
        let dynamic = self.config.enable_dynamic_sizing
            && !self.snap_specs.contains(&SnapPoint::Content);
        (self.snap_specs.len() + usize::from(dynamic)) as i32 - 1
    }

    /// Offset for an index, with `-1` meaning the closed position.
    pub fn index_position(&self, index: i32) -> Option<f32> {
        if index == -1 {
            return Some(self.closed_position());
        }
        self.snap_points.peek().get(index)
    }
}
