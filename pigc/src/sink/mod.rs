//! Consumers of key events.

#[cfg(feature = "uinput")]
pub mod uinput;

use crate::error::Result;
use crate::event::KeyEvent;
use crate::keycode::KeyCode;

#[cfg(feature = "uinput")]
pub use uinput::UinputSink;

/// Downstream consumer of key transitions, typically a synthetic keyboard.
///
/// Every key that will ever be emitted is registered first, then events are
/// emitted one at a time. A failing `emit` is fatal to the caller.
pub trait EventSink {
    fn register_key(&mut self, key: KeyCode) -> Result<()>;

    fn emit(&mut self, event: KeyEvent) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn register_key(&mut self, key: KeyCode) -> Result<()> {
        (**self).register_key(key)
    }

    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        (**self).emit(event)
    }
}
