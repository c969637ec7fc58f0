use core::time::Duration;

use embedded_hal::digital::{InputPin, PinState};

use crate::error::{Error, Result};

pub mod settle_debouncer;

pub use settle_debouncer::SettleDebouncer;

/// Default settle time between an edge notification and the confirming read
pub const DEBOUNCE_TIME: Duration = Duration::from_millis(5);

/// Decides whether an edge notification on a line is a real transition.
pub trait DebouncerTrait {
    /// Called once per notification of `line`, whose last accepted level is
    /// `last_level`.
    fn detect_change_with_debounce<In>(&mut self, line: &mut In, last_level: PinState) -> Result<DebounceState>
    where
        In: InputPin,
        In::Error: Into<Error>;
}

/// Debounce state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceState {
    /// The line settled on a new level
    Debounced(PinState),
    /// The line settled back on its last level, the notification is dropped
    Ignored,
}
