use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};
use snapsheet_core::{Clock, Duration, Graph, Insets, SystemClock, mailbox};

use crate::config::{KeyboardAnimation, SheetConfig, SnapPoint};
use crate::error::{Result, SheetError};
use crate::events::EventReceiver;
use crate::snap_points::SnapPoints;
use crate::state::{Deps, SheetCore};
use crate::types::{
    AnimationState, GestureSource, GestureState, KeyboardEasing, KeyboardState,
    ScrollableLockState, SheetState,
};
use crate::watchers;

new_key_type! {
    pub struct ObserverId;
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetSnapshot {
    pub position: f32,
    pub fractional_index: f32,
    pub current_index: i32,
    pub sheet_state: SheetState,
    pub scrollable_lock_state: ScrollableLockState,
    pub animation_state: AnimationState,
    pub max_content_height: f32,
    pub footer_offset: f32,
    pub is_layout_calculated: bool,
}

type Observer = Box<dyn FnMut(&SheetSnapshot)>;

/// A sheet and its animation context.
///
/// Every input setter and control call runs one propagation pass before it
/// returns, so the state read back afterwards is already consistent. Call
/// [`Sheet::frame`] once per display frame to advance a running transition.
pub struct Sheet {
    pub(crate) core: SheetCore,
    graph: Graph<SheetCore, Deps>,
    receiver: EventReceiver,
    observers: SlotMap<ObserverId, Observer>,
    last_snapshot: Option<SheetSnapshot>,
    pub(crate) drag_source: Option<GestureSource>,
}

impl Sheet {
    pub fn new(config: SheetConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: SheetConfig, clock: impl Clock) -> Self {
        let (outbox, inbox) = mailbox();
        let core = SheetCore::new(config, Arc::new(clock), outbox);
        let mut graph = Graph::new();
        watchers::install(&mut graph, &core);
        let mut sheet = Self {
            core,
            graph,
            receiver: EventReceiver::new(inbox),
            observers: SlotMap::with_key(),
            last_snapshot: None,
            drag_source: None,
        };
        sheet.flush();
        sheet
    }

    /// Handle for draining host callbacks; clones share one queue.
    pub fn events(&self) -> EventReceiver {
        self.receiver.clone()
    }

    pub(crate) fn flush(&mut self) {
        let touched = self.graph.propagate(&mut self.core);
        if touched.is_empty() && self.last_snapshot.is_some() {
            return;
        }
        let snapshot = self.snapshot();
        if self.last_snapshot == Some(snapshot) {
            return;
        }
        self.last_snapshot = Some(snapshot);
        for observer in self.observers.values_mut() {
            observer(&snapshot);
        }
    }

    /// Advance the running transition; returns `true` while one is in flight.
    pub fn frame(&mut self) -> bool {
        let running = self.core.advance();
        self.flush();
        running
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SheetSnapshot) + 'static) -> ObserverId {
        self.observers.insert(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    // Inputs

    pub fn set_container_height(&mut self, height: f32) {
        self.core.set_container_height(height);
        self.flush();
    }

    pub fn set_container_offset(&mut self, offset: Insets) {
        self.core.set_container_offset(offset);
        self.flush();
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.core.set_content_height(height);
        self.flush();
    }

    pub fn set_handle_height(&mut self, height: f32) {
        self.core.set_handle_height(height);
        self.flush();
    }

    pub fn set_footer_height(&mut self, height: f32) {
        self.core.set_footer_height(height);
        self.flush();
    }

    pub fn set_keyboard(&mut self, state: KeyboardState, height: f32) {
        self.core.set_keyboard(state, height);
        self.flush();
    }

    /// Timing used for the next keyboard-driven transition.
    pub fn set_keyboard_animation(&mut self, easing: KeyboardEasing, duration: Duration) {
        self.core.keyboard_animation = KeyboardAnimation { easing, duration };
    }

    pub fn set_gesture_state(&mut self, source: GestureSource, state: GestureState) {
        self.core.set_gesture_state(source, state);
        self.flush();
    }

    pub fn set_scrollable_override(&mut self, state: Option<ScrollableLockState>) {
        self.core.set_scrollable_override(state);
        self.flush();
    }

    pub fn set_snap_points(&mut self, points: Vec<SnapPoint>) {
        self.core.set_snap_specs(points);
        self.flush();
    }

    /// Follow an index supplied by the host. Before mount this only changes
    /// where the sheet will mount.
    pub fn set_index(&mut self, index: i32) -> Result<()> {
        if !self.core.is_animated_on_mount {
            let max = self.core.expected_last_index();
            if !(-1..=max).contains(&index) {
                return Err(SheetError::IndexOutOfRange { index, max });
            }
            self.core.provided_index = index;
            return Ok(());
        }
        if index == self.core.current_index() {
            return Ok(());
        }
        self.snap_to_index(index, None)
    }

    // Outputs

    pub fn position(&self) -> f32 {
        self.core.position()
    }

    pub fn fractional_index(&self) -> f32 {
        self.core.fractional_index()
    }

    pub fn current_index(&self) -> i32 {
        self.core.current_index()
    }

    pub fn sheet_state(&self) -> SheetState {
        self.core.sheet_state()
    }

    pub fn scrollable_lock_state(&self) -> ScrollableLockState {
        self.core.scrollable_lock_state()
    }

    pub fn max_content_height(&self) -> f32 {
        self.core.max_content_height()
    }

    pub fn footer_offset(&self) -> f32 {
        self.core.footer_offset()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.core.animation_state()
    }

    pub fn snap_points(&self) -> &SnapPoints {
        self.core.snap_points()
    }

    pub fn closed_position(&self) -> f32 {
        self.core.closed_position()
    }

    pub fn is_layout_calculated(&self) -> bool {
        self.core.is_layout_calculated()
    }

    pub fn is_in_temporary_position(&self) -> bool {
        self.core.is_in_temporary_position()
    }

    pub fn is_forced_closing(&self) -> bool {
        self.core.is_forced_closing()
    }

    /// Read-only view of the full engine state.
    pub fn core(&self) -> &SheetCore {
        &self.core
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            position: self.core.position(),
            fractional_index: self.core.fractional_index(),
            current_index: self.core.current_index(),
            sheet_state: self.core.sheet_state(),
            scrollable_lock_state: self.core.scrollable_lock_state(),
            animation_state: self.core.animation_state(),
            max_content_height: self.core.max_content_height(),
            footer_offset: self.core.footer_offset(),
            is_layout_calculated: self.core.is_layout_calculated(),
        }
    }
}
