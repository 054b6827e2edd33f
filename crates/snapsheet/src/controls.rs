use snapsheet_core::AnimationSpec;

use crate::config::SnapPoint;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use crate::snap_points;
use crate::types::AnimationSource;

impl Sheet {
    /// Animate to a snap point; `-1` closes.
    ///
    /// Before layout is calculated this is a no-op. An index outside
    /// `-1..=last` is rejected without touching any state.
    pub fn snap_to_index(&mut self, index: i32, spec: Option<AnimationSpec>) -> Result<()> {
        let max = self.core.snap_points().last_index();
        if !(-1..=max).contains(&index) {
            return Err(SheetError::IndexOutOfRange { index, max });
        }
        if !self.core.is_layout_calculated() {
            log::debug!("snap_to_index({index}) before layout; ignoring");
            return Ok(());
        }
        if self.core.is_forced_closing() {
            log::debug!("snap_to_index({index}) during forced close; ignoring");
            return Ok(());
        }
        let target = self.core.index_position(index);
        self.core.set_temporary(false);
        self.core
            .animate_to_position(target, AnimationSource::User, 0.0, spec);
        self.flush();
        Ok(())
    }

    /// Animate to an arbitrary point. The sheet stays there until something
    /// moves it back onto a snap point.
    pub fn snap_to_position(&mut self, point: SnapPoint, spec: Option<AnimationSpec>) {
        let core = &self.core;
        if core.is_forced_closing() || !core.is_layout_calculated() {
            log::debug!("snap_to_position({point}) ignored");
            return;
        }
        let Some(container) = core.container_height() else {
            return;
        };
        let target = match point {
            SnapPoint::Content => self.content_position(container),
            fixed => snap_points::normalize_snap_point(fixed, container),
        };
        self.core.set_temporary(true);
        self.core
            .animate_to_position(target, AnimationSource::User, 0.0, spec);
        self.flush();
    }

    fn content_position(&self, container: f32) -> Option<f32> {
        let core = &self.core;
        let content = core.content_height.get()?;
        let handle = core.handle_height.get()?;
        Some(snap_points::content_snap_point(
            container,
            content,
            handle,
            core.config.max_dynamic_content_size,
        ))
    }

    /// Snap to the highest point.
    pub fn expand(&mut self, spec: Option<AnimationSpec>) {
        let last = self.core.snap_points().last_index();
        self.snap_within_range(last, spec);
    }

    /// Snap to the lowest point.
    pub fn collapse(&mut self, spec: Option<AnimationSpec>) {
        self.snap_within_range(0, spec);
    }

    fn snap_within_range(&mut self, index: i32, spec: Option<AnimationSpec>) {
        if self.core.is_forced_closing() {
            return;
        }
        if let Err(err) = self.snap_to_index(index, spec) {
            log::debug!("{err}");
        }
    }

    pub fn close(&mut self, spec: Option<AnimationSpec>) {
        if self.core.is_forced_closing() || !self.core.is_layout_calculated() {
            return;
        }
        let closed = self.core.closed_position();
        self.core.set_temporary(false);
        self.core
            .animate_to_position(Some(closed), AnimationSource::User, 0.0, spec);
        self.flush();
    }

    /// Close and refuse every other target until the sheet is closed.
    pub fn force_close(&mut self, spec: Option<AnimationSpec>) {
        if self.core.is_forced_closing() || !self.core.is_layout_calculated() {
            return;
        }
        let closed = self.core.closed_position();
        self.core.set_temporary(false);
        self.core
            .animate_to_position(Some(closed), AnimationSource::User, 0.0, spec);
        if self.core.is_running() && self.core.next_position() == Some(closed) {
            self.core.is_forced_closing = true;
        }
        self.flush();
    }
}
