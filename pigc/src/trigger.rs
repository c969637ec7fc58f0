use log::info;

use crate::error::{Error, Result};
use crate::input_bank::KeyState;
use crate::keycode::KeyCode;

/// Policy run synchronously after every accepted transition, before the
/// transition is handed to the caller.
pub trait TransitionHook {
    /// `states` holds the semantic state of every channel, in configuration
    /// order, already updated with the transition.
    fn on_transition(&mut self, states: &[KeyState]);
}

/// Fires an action whenever two given channels are pressed at the same time.
///
/// The check runs on every transition, including transitions of other
/// channels while both trigger keys are held.
pub struct ShutdownTrigger<F: FnMut()> {
    first: usize,
    second: usize,
    action: F,
}

impl<F: FnMut()> ShutdownTrigger<F> {
    /// Resolve `first` and `second` against the configured `keys`.
    ///
    /// Fails when either key is not configured or both are the same key.
    pub fn new(keys: &[KeyCode], first: KeyCode, second: KeyCode, action: F) -> Result<Self> {
        if first == second {
            return Err(Error::Configuration(format!("shutdown combo uses {first:?} twice")));
        }
        let position = |key: KeyCode| {
            keys.iter()
                .position(|&k| k == key)
                .ok_or_else(|| Error::Configuration(format!("shutdown combo key {key:?} is not bound to any line")))
        };
        Ok(Self {
            first: position(first)?,
            second: position(second)?,
            action,
        })
    }
}

impl<F: FnMut()> TransitionHook for ShutdownTrigger<F> {
    fn on_transition(&mut self, states: &[KeyState]) {
        let held = |idx: usize| states.get(idx).is_some_and(|s| s.pressed);
        if held(self.first) && held(self.second) {
            info!("Shutdown combo held");
            (self.action)();
        }
    }
}
