use crate::keycode::KeyCode;

/// A validated transition of one channel, in semantic polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode, pressed: bool) -> Self {
        Self { key, pressed }
    }

    /// Event value as the input subsystem expects it: 1 pressed, 0 released
    pub fn value(&self) -> i32 {
        i32::from(self.pressed)
    }
}
