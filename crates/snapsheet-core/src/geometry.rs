/// Vertical insets of a container relative to its root view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        bottom: 0.0,
    };

    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}
