use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use snapsheet_core::{AnimationSpec, Duration, Easing, SpringConfig};

use crate::error::SheetError;
use crate::types::{
    KeyboardBehavior, KeyboardBlurBehavior, KeyboardEasing, KeyboardInputMode, Platform,
};

/// A raw snap point as supplied by the host, before normalization.
///
/// Pixel and percentage values are heights measured up from the bottom of the
/// container. Parses from `"300"`, `"50%"` and `"content"`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawSnapPoint", into = "RawSnapPoint")
)]
pub enum SnapPoint {
    Pixels(f32),
    /// Percentage of the container height, `50.0` meaning half.
    Percent(f32),
    /// Fit to content plus handle.
    Content,
}

impl From<f32> for SnapPoint {
    fn from(px: f32) -> Self {
        SnapPoint::Pixels(px)
    }
}

impl FromStr for SnapPoint {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("content") {
            return Ok(SnapPoint::Content);
        }
        let invalid = || SheetError::InvalidSnapPoint(s.to_string());
        let (number, percent) = match text.strip_suffix('%') {
            Some(n) => (n.trim(), true),
            None => (text, false),
        };
        let value: f32 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(if percent {
            SnapPoint::Percent(value)
        } else {
            SnapPoint::Pixels(value)
        })
    }
}

impl fmt::Display for SnapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapPoint::Pixels(px) => write!(f, "{px}"),
            SnapPoint::Percent(pct) => write!(f, "{pct}%"),
            SnapPoint::Content => f.write_str("content"),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSnapPoint {
    Pixels(f32),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<RawSnapPoint> for SnapPoint {
    type Error = SheetError;

    fn try_from(raw: RawSnapPoint) -> Result<Self, Self::Error> {
        match raw {
            RawSnapPoint::Pixels(px) => Ok(SnapPoint::Pixels(px)),
            RawSnapPoint::Text(text) => text.parse(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<SnapPoint> for RawSnapPoint {
    fn from(point: SnapPoint) -> Self {
        match point {
            SnapPoint::Pixels(px) => RawSnapPoint::Pixels(px),
            other => RawSnapPoint::Text(other.to_string()),
        }
    }
}

/// Timing reported by the keyboard observer for its show/hide animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardAnimation {
    pub easing: KeyboardEasing,
    pub duration: Duration,
}

impl Default for KeyboardAnimation {
    fn default() -> Self {
        Self {
            easing: KeyboardEasing::Keyboard,
            duration: Duration::from_millis(250),
        }
    }
}

impl KeyboardAnimation {
    pub fn spec(&self) -> AnimationSpec {
        let easing = match self.easing {
            KeyboardEasing::Keyboard => return AnimationSpec::spring(SpringConfig::sheet()),
            KeyboardEasing::EaseIn => Easing::EaseIn,
            KeyboardEasing::EaseOut => Easing::EaseOut,
            KeyboardEasing::EaseInEaseOut => Easing::EaseInOut,
            KeyboardEasing::Linear => Easing::Linear,
        };
        AnimationSpec::tween(self.duration, easing)
    }
}

/// Default snapping animation for a platform.
pub fn default_animation(platform: Platform) -> AnimationSpec {
    match platform {
        Platform::Ios => AnimationSpec::spring(SpringConfig::sheet()),
        Platform::Android => AnimationSpec::tween(Duration::from_millis(250), Easing::ExpOut),
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SheetConfig {
    pub snap_points: Vec<SnapPoint>,
    /// Index to open at on mount; `-1` mounts closed.
    pub index: i32,
    pub animate_on_mount: bool,
    /// Add a content-fit snap point derived from the measured content height.
    pub enable_dynamic_sizing: bool,
    pub max_dynamic_content_size: Option<f32>,
    pub has_handle: bool,
    pub modal: bool,
    pub detached: bool,
    pub bottom_inset: f32,
    pub keyboard_behavior: KeyboardBehavior,
    pub keyboard_blur_behavior: KeyboardBlurBehavior,
    pub keyboard_input_mode: KeyboardInputMode,
    pub platform: Platform,
    pub enable_pan_down_to_close: bool,
    pub enable_over_drag: bool,
    /// Overrides the platform default from [`default_animation`].
    #[cfg_attr(feature = "serde", serde(skip))]
    pub animation: Option<AnimationSpec>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_points: Vec::new(),
            index: 0,
            animate_on_mount: true,
            enable_dynamic_sizing: true,
            max_dynamic_content_size: None,
            has_handle: true,
            modal: false,
            detached: false,
            bottom_inset: 0.0,
            keyboard_behavior: KeyboardBehavior::default(),
            keyboard_blur_behavior: KeyboardBlurBehavior::default(),
            keyboard_input_mode: KeyboardInputMode::default(),
            platform: Platform::default(),
            enable_pan_down_to_close: false,
            enable_over_drag: true,
            animation: None,
        }
    }
}

impl SheetConfig {
    /// Fixed snap points, no dynamic sizing.
    pub fn new(snap_points: impl IntoIterator<Item = SnapPoint>) -> Self {
        Self {
            snap_points: snap_points.into_iter().collect(),
            enable_dynamic_sizing: false,
            ..Self::default()
        }
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.index = index;
        self
    }

    pub fn animate_on_mount(mut self, animate: bool) -> Self {
        self.animate_on_mount = animate;
        self
    }

    pub fn dynamic_sizing(mut self, enabled: bool) -> Self {
        self.enable_dynamic_sizing = enabled;
        self
    }

    pub fn max_dynamic_content_size(mut self, max: f32) -> Self {
        self.max_dynamic_content_size = Some(max);
        self
    }

    pub fn without_handle(mut self) -> Self {
        self.has_handle = false;
        self
    }

    pub fn modal(mut self, bottom_inset: f32) -> Self {
        self.modal = true;
        self.bottom_inset = bottom_inset;
        self
    }

    pub fn detached(mut self, bottom_inset: f32) -> Self {
        self.detached = true;
        self.bottom_inset = bottom_inset;
        self
    }

    pub fn keyboard_behavior(mut self, behavior: KeyboardBehavior) -> Self {
        self.keyboard_behavior = behavior;
        self
    }

    pub fn keyboard_blur_behavior(mut self, behavior: KeyboardBlurBehavior) -> Self {
        self.keyboard_blur_behavior = behavior;
        self
    }

    pub fn keyboard_input_mode(mut self, mode: KeyboardInputMode) -> Self {
        self.keyboard_input_mode = mode;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn pan_down_to_close(mut self, enabled: bool) -> Self {
        self.enable_pan_down_to_close = enabled;
        self
    }

    pub fn over_drag(mut self, enabled: bool) -> Self {
        self.enable_over_drag = enabled;
        self
    }

    pub fn animation(mut self, spec: AnimationSpec) -> Self {
        self.animation = Some(spec);
        self
    }

    /// Modal and detached sheets float above the bottom edge.
    pub fn is_floating(&self) -> bool {
        self.modal || self.detached
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        self.animation
            .unwrap_or_else(|| default_animation(self.platform))
    }
}
