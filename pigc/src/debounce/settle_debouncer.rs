use core::time::Duration;
use std::thread;

use embedded_hal::digital::{InputPin, PinState};

use super::{DEBOUNCE_TIME, DebounceState, DebouncerTrait};
use crate::driver::read_level;
use crate::error::{Error, Result};

/// Sleeps a fixed settle time after a notification, then samples the line
/// once and compares it against the last accepted level.
///
/// Contact bounce that returns to the original level inside the settle window
/// is never observed.
#[derive(Clone, Copy, Debug)]
pub struct SettleDebouncer {
    settle_time: Duration,
}

impl Default for SettleDebouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_TIME)
    }
}

impl SettleDebouncer {
    pub fn new(settle_time: Duration) -> Self {
        Self { settle_time }
    }

    pub fn settle_time(&self) -> Duration {
        self.settle_time
    }
}

impl DebouncerTrait for SettleDebouncer {
    fn detect_change_with_debounce<In>(&mut self, line: &mut In, last_level: PinState) -> Result<DebounceState>
    where
        In: InputPin,
        In::Error: Into<Error>,
    {
        if !self.settle_time.is_zero() {
            thread::sleep(self.settle_time);
        }
        let level = read_level(line)?;
        if level != last_level {
            Ok(DebounceState::Debounced(level))
        } else {
            Ok(DebounceState::Ignored)
        }
    }
}
