//! Snap point normalization.
//!
//! Raw [`SnapPoint`]s are heights measured from the bottom of the container.
//! The engine works in offsets from the top, so every point becomes
//! `container - height`, clamped at zero. The normalized list is sorted by
//! descending offset: index 0 is the lowest resting point, the last index the
//! highest.

use smallvec::{SmallVec, smallvec};

use crate::config::SnapPoint;
use crate::types::SnapPointKind;

/// Placeholder first element while inputs are still unmeasured.
pub const INITIAL_SNAP_POINT: f32 = -999.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SnapPoints {
    offsets: SmallVec<[f32; 4]>,
    dynamic_index: Option<usize>,
}

impl Default for SnapPoints {
    fn default() -> Self {
        Self::pending()
    }
}

impl SnapPoints {
    pub fn pending() -> Self {
        Self {
            offsets: smallvec![INITIAL_SNAP_POINT],
            dynamic_index: None,
        }
    }

    /// Build from already-normalized offsets; sorts them descending.
    pub fn from_offsets(offsets: impl IntoIterator<Item = f32>) -> Self {
        let mut offsets: SmallVec<[f32; 4]> = offsets.into_iter().collect();
        offsets.sort_by(|a, b| b.total_cmp(a));
        Self {
            offsets,
            dynamic_index: None,
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.offsets
            .first()
            .is_some_and(|first| *first != INITIAL_SNAP_POINT)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset for `index`; `None` for `-1` or anything out of range.
    pub fn get(&self, index: i32) -> Option<f32> {
        if !self.is_normalized() {
            return None;
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.offsets.get(i).copied())
    }

    /// Smallest offset, i.e. the point closest to the top.
    pub fn highest(&self) -> Option<f32> {
        if !self.is_normalized() {
            return None;
        }
        self.offsets.last().copied()
    }

    pub fn last_index(&self) -> i32 {
        self.offsets.len() as i32 - 1
    }

    pub fn index_of(&self, offset: f32) -> Option<usize> {
        if !self.is_normalized() {
            return None;
        }
        self.offsets.iter().position(|p| *p == offset)
    }

    pub fn dynamic_index(&self) -> Option<usize> {
        self.dynamic_index
    }

    pub fn kind_of(&self, index: i32) -> SnapPointKind {
        match self.dynamic_index {
            Some(d) if index >= 0 && d == index as usize => SnapPointKind::Dynamic,
            _ => SnapPointKind::Provided,
        }
    }
}

/// Measured extents the normalizer depends on; `None` means not measured yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurements {
    pub container_height: Option<f32>,
    pub content_height: Option<f32>,
    pub handle_height: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DynamicSizing {
    pub enabled: bool,
    pub max_content_size: Option<f32>,
}

/// Offset of a single fixed point. Content points have no fixed offset.
pub fn normalize_snap_point(point: SnapPoint, container_height: f32) -> Option<f32> {
    let height = match point {
        SnapPoint::Pixels(px) => px,
        SnapPoint::Percent(pct) => pct * container_height / 100.0,
        SnapPoint::Content => return None,
    };
    Some((container_height - height).max(0.0))
}

/// Offset of the content-fit point, clamped into `[0, container]`.
pub fn content_snap_point(
    container_height: f32,
    content_height: f32,
    handle_height: f32,
    max_content_size: Option<f32>,
) -> f32 {
    let fit = (content_height + handle_height).min(max_content_size.unwrap_or(container_height));
    (container_height - fit).clamp(0.0, container_height.max(0.0))
}

pub fn normalize(specs: &[SnapPoint], m: Measurements, dynamic: DynamicSizing) -> SnapPoints {
    let Some(container) = m.container_height else {
        return SnapPoints::pending();
    };

    let mut offsets: SmallVec<[f32; 4]> = specs
        .iter()
        .filter_map(|p| normalize_snap_point(*p, container))
        .collect();

    let wants_content = dynamic.enabled || specs.contains(&SnapPoint::Content);
    let mut dynamic_point = None;
    if wants_content {
        let (Some(content), Some(handle)) = (m.content_height, m.handle_height) else {
            return SnapPoints::pending();
        };
        let point = content_snap_point(container, content, handle, dynamic.max_content_size);
        if !offsets.contains(&point) {
            offsets.push(point);
        }
        dynamic_point = Some(point);
    }

    if offsets.is_empty() {
        log::warn!("no snap points to normalize; sheet will stay unmeasured");
        return SnapPoints::pending();
    }

    offsets.sort_by(|a, b| b.total_cmp(a));
    let dynamic_index = dynamic_point.and_then(|p| offsets.iter().position(|o| *o == p));

    SnapPoints {
        offsets,
        dynamic_index,
    }
}
