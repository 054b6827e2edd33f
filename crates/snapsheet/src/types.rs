#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse classification of the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetState {
    Closed,
    Opened,
    Extended,
    OverExtended,
    FillParent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollableLockState {
    Locked,
    Unlocked,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationState {
    #[default]
    Undetermined,
    Running,
    Stopped,
}

/// Why a transition was started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationSource {
    #[default]
    None,
    Mount,
    Gesture,
    User,
    ContainerResize,
    SnapPointChange,
    Keyboard,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardState {
    #[default]
    Hidden,
    Shown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    #[default]
    Undetermined,
    Began,
    Active,
    End,
    Cancelled,
}

impl GestureState {
    /// Began or active; the user currently owns the sheet.
    pub fn is_engaged(self) -> bool {
        matches!(self, GestureState::Began | GestureState::Active)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureSource {
    Content,
    Handle,
}

/// Whether a committed snap point came from the caller or from content size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapPointKind {
    Provided,
    Dynamic,
}

/// How the sheet reacts to the keyboard appearing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum KeyboardBehavior {
    /// Lift the sheet by the keyboard height.
    #[default]
    Interactive,
    /// Move to the highest snap point.
    Extend,
    /// Fill the whole container.
    FillParent,
}

/// What happens when the keyboard hides again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum KeyboardBlurBehavior {
    #[default]
    None,
    Restore,
}

/// Android window soft-input mode, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum KeyboardInputMode {
    #[default]
    AdjustPan,
    AdjustResize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

/// Easing reported alongside keyboard show/hide events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum KeyboardEasing {
    /// The platform keyboard curve; approximated with the sheet spring.
    #[default]
    Keyboard,
    EaseIn,
    EaseOut,
    EaseInEaseOut,
    Linear,
}
