#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
}

/// Key state as seen by one tick. Polled once per tick.
pub trait InputProvider {
    fn is_key_held(&self, key: Key) -> bool;

    /// True only on the tick the fire key went down.
    fn shoot_pressed(&self) -> bool;
}

/// A plain snapshot of the input, handy for tests and replays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn shooting() -> Self {
        Self {
            shoot: true,
            ..Self::default()
        }
    }
}

impl InputProvider for TickInput {
    fn is_key_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    fn shoot_pressed(&self) -> bool {
        self.shoot
    }
}
