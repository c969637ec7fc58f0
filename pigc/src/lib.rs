//! Edge-triggered GPIO input bank feeding a synthetic keyboard.
//!
//! Physical buttons are wired to GPIO lines. An [`InputBank`] exports and
//! configures every line for both-edge notification, blocks in a multiplexed
//! wait until one of them fires, debounces it and hands out exactly one
//! [`KeyEvent`] per real transition. [`run`] forwards that stream into an
//! [`EventSink`], usually the [`UinputSink`] virtual keyboard.

pub mod config;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod event;
pub mod input_bank;
pub mod input_device;
pub mod keycode;
pub mod poll;
pub mod sink;
pub mod trigger;

pub use config::{KeymapConfig, PinConfig};
pub use debounce::{DebounceState, DebouncerTrait, SettleDebouncer};
pub use driver::{LineId, SysfsLine};
pub use error::{Error, Result};
pub use event::KeyEvent;
pub use input_bank::{InputBank, KeyState, MAX_CHANNELS};
pub use input_device::{InputDevice, run};
pub use keycode::KeyCode;
pub use poll::{EdgeWaiter, PollWaiter};
pub use sink::EventSink;
#[cfg(feature = "uinput")]
pub use sink::UinputSink;
pub use trigger::{ShutdownTrigger, TransitionHook};

/// Raw pin level, re-exported for implementors of custom lines
pub use embedded_hal::digital::PinState;
