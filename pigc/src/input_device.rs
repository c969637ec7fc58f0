use core::convert::Infallible;

use log::debug;

use crate::error::Result;
use crate::event::KeyEvent;
use crate::sink::EventSink;

/// Trait for devices producing key events, one at a time.
pub trait InputDevice {
    /// Block until the next event is available.
    fn read_event(&mut self) -> Result<KeyEvent>;
}

/// Forward every event of `device` to `sink`, forever.
///
/// Only returns on the first error of either side: no event is dropped
/// silently.
pub fn run<D: InputDevice, S: EventSink>(device: &mut D, sink: &mut S) -> Result<Infallible> {
    loop {
        let event = device.read_event()?;
        debug!("key_event key={:#x} val={}", event.key.code(), event.value());
        sink.emit(event)?;
    }
}
