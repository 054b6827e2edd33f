/// Single-writer value cell with change detection.
///
/// Unlike a shared observable, a `Signal` is owned by exactly one state struct
/// and written through `&mut`. Writes report whether the stored value actually
/// changed, which is what the owner uses to mark its dependency bits dirty.
#[derive(Clone, Debug, Default)]
pub struct Signal<T> {
    value: T,
}

impl<T> Signal<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn peek(&self) -> &T {
        &self.value
    }

    /// Store `v`; returns `true` if the value changed.
    pub fn set(&mut self, v: T) -> bool
    where
        T: PartialEq,
    {
        if self.value == v {
            return false;
        }
        self.value = v;
        true
    }
}
