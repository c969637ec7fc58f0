use embedded_hal::digital::{InputPin, PinState};
use heapless::Vec;
use log::{debug, info};

use crate::config::KeymapConfig;
use crate::debounce::{DebounceState, DebouncerTrait, SettleDebouncer};
use crate::driver::{LineId, SysfsLine, read_level};
use crate::error::{Error, Result};
use crate::event::KeyEvent;
use crate::input_device::InputDevice;
use crate::keycode::KeyCode;
use crate::poll::{EdgeWaiter, PollWaiter};
use crate::trigger::{ShutdownTrigger, TransitionHook};

/// Max number of channels in one bank
pub const MAX_CHANNELS: usize = 32;

/// KeyState represents the semantic state of a key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    // True if the key is pressed
    pub pressed: bool,
}

/// Binding of one line to one key, plus its last accepted level.
#[derive(Copy, Clone, Debug)]
struct Channel {
    line_id: LineId,
    key: KeyCode,
    last_level: PinState,
}

/// A fixed set of edge-notified input lines, turned into a stream of
/// debounced key transitions.
///
/// `next_event` blocks until exactly one channel changed level, then returns
/// it. Channels are scanned in configuration order; when several are ready in
/// the same wake-up the first real transition wins and the rest stay flagged
/// for the next call.
pub struct InputBank<In, W, D> {
    /// Input lines, in configuration order
    lines: Vec<In, MAX_CHANNELS>,
    channels: Vec<Channel, MAX_CHANNELS>,
    /// Semantic state, what transition hooks see
    key_states: Vec<KeyState, MAX_CHANNELS>,
    /// Lines reported ready by the last wait and not processed yet
    ready: [bool; MAX_CHANNELS],
    waiter: W,
    debouncer: D,
    /// Raw low level means pressed
    low_active: bool,
    hook: Option<Box<dyn TransitionHook>>,
}

impl<In, W, D> InputBank<In, W, D>
where
    In: InputPin,
    In::Error: Into<Error>,
    W: EdgeWaiter<In>,
    D: DebouncerTrait,
{
    /// Build a bank from already opened lines and seed every channel with a
    /// read of its current level.
    pub fn new(
        lines: impl IntoIterator<Item = (LineId, KeyCode, In)>,
        waiter: W,
        debouncer: D,
        low_active: bool,
    ) -> Result<Self> {
        let mut bank = Self {
            lines: Vec::new(),
            channels: Vec::new(),
            key_states: Vec::new(),
            ready: [false; MAX_CHANNELS],
            waiter,
            debouncer,
            low_active,
            hook: None,
        };

        for (line_id, key, mut line) in lines {
            if bank.channels.iter().any(|c| c.line_id == line_id) {
                return Err(Error::Configuration(format!("gpio{line_id} is bound twice")));
            }
            if bank.channels.iter().any(|c| c.key == key) {
                return Err(Error::Configuration(format!("{key:?} is bound twice")));
            }
            let last_level = read_level(&mut line)?;
            let pressed = is_active(last_level, low_active);
            bank.lines
                .push(line)
                .map_err(|_| Error::Configuration(format!("more than {MAX_CHANNELS} lines")))?;
            // Capacities are equal, these cannot fail once `lines` accepted
            let _ = bank.channels.push(Channel { line_id, key, last_level });
            let _ = bank.key_states.push(KeyState { pressed });
            debug!("gpio{line_id}: bound to {key:?}, level {last_level:?}");
        }

        if bank.channels.is_empty() {
            return Err(Error::Configuration("input bank has no lines".into()));
        }
        Ok(bank)
    }

    /// Block until one debounced transition happened, then return it.
    pub fn next_event(&mut self) -> Result<KeyEvent> {
        let len = self.lines.len();
        loop {
            for idx in 0..len {
                if !core::mem::take(&mut self.ready[idx]) {
                    continue;
                }

                let channel = &mut self.channels[idx];
                let line = &mut self.lines[idx];
                match self.debouncer.detect_change_with_debounce(line, channel.last_level)? {
                    DebounceState::Debounced(level) => {
                        channel.last_level = level;
                        let pressed = is_active(level, self.low_active);
                        self.key_states[idx].pressed = pressed;
                        let event = KeyEvent::new(channel.key, pressed);

                        if let Some(hook) = self.hook.as_mut() {
                            hook.on_transition(&self.key_states);
                        }
                        return Ok(event);
                    }
                    DebounceState::Ignored => {
                        debug!("gpio{}: edge without level change ignored", channel.line_id);
                    }
                }
            }

            // Every flag is consumed here, re-arm all lines and wait
            self.waiter.wait(&self.lines, &mut self.ready[..len])?;
        }
    }

    /// Install a policy run after every accepted transition, replacing any
    /// previous one.
    pub fn set_hook(&mut self, hook: Box<dyn TransitionHook>) {
        self.hook = Some(hook);
    }

    /// Run `action` whenever `first` and `second` are pressed together.
    ///
    /// Both keys must be bound to lines of this bank, otherwise nothing is
    /// installed.
    pub fn set_shutdown_combo(&mut self, first: KeyCode, second: KeyCode, action: impl FnMut() + 'static) -> Result<()> {
        let keys: Vec<KeyCode, MAX_CHANNELS> = self.keys().collect();
        let trigger = ShutdownTrigger::new(&keys, first, second, action)?;
        info!("Shutdown combo: {first:?} + {second:?}");
        self.set_hook(Box::new(trigger));
        Ok(())
    }
}

impl<In, W, D> InputBank<In, W, D> {
    /// Configured keys, in configuration order
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.channels.iter().map(|c| c.key)
    }

    /// Call `f` for every configured key, in order. The first error stops the
    /// enumeration and is returned.
    pub fn map_keys<E>(&self, f: impl FnMut(KeyCode) -> core::result::Result<(), E>) -> core::result::Result<(), E> {
        self.keys().try_for_each(f)
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Last accepted raw level of the line bound to `key`
    pub fn last_level(&self, key: KeyCode) -> Option<PinState> {
        self.channels.iter().find(|c| c.key == key).map(|c| c.last_level)
    }

    /// Semantic state of every channel, in configuration order
    pub fn key_states(&self) -> &[KeyState] {
        &self.key_states
    }

    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }
}

impl InputBank<SysfsLine, PollWaiter, SettleDebouncer> {
    /// Export and configure every line of `config` through sysfs.
    ///
    /// A failure on any line is returned as is; lines opened before it are
    /// released when they are dropped.
    pub fn open_sysfs(config: &KeymapConfig) -> Result<Self> {
        config.validate()?;
        let mut lines = std::vec::Vec::with_capacity(config.pins.len());
        for pin in &config.pins {
            lines.push((pin.line, pin.key, SysfsLine::open(&config.sysfs_root, pin.line)?));
        }
        let bank = Self::new(
            lines,
            PollWaiter::new(),
            SettleDebouncer::new(config.debounce()),
            config.active_low,
        )?;
        info!(
            "Input bank ready, {} lines, settle time {:?}",
            bank.len(),
            bank.debouncer.settle_time()
        );
        Ok(bank)
    }
}

impl<In, W, D> InputDevice for InputBank<In, W, D>
where
    In: InputPin,
    In::Error: Into<Error>,
    W: EdgeWaiter<In>,
    D: DebouncerTrait,
{
    fn read_event(&mut self) -> Result<KeyEvent> {
        self.next_event()
    }
}

fn is_active(level: PinState, low_active: bool) -> bool {
    match level {
        PinState::Low => low_active,
        PinState::High => !low_active,
    }
}
