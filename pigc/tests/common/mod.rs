#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, PinState};
use pigc::{EdgeWaiter, Error, InputBank, KeyCode, LineId, Result, SettleDebouncer};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// A line whose level is set by the test, through any clone of it.
#[derive(Clone)]
pub struct MockLine {
    line: LineId,
    level: Rc<Cell<PinState>>,
    reads: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl MockLine {
    pub fn new(line: u32, level: PinState) -> Self {
        Self {
            line: LineId(line),
            level: Rc::new(Cell::new(level)),
            reads: Rc::new(Cell::new(0)),
            fail: Rc::new(Cell::new(false)),
        }
    }

    pub fn set_level(&self, level: PinState) {
        self.level.set(level);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Make every following read fail
    pub fn break_line(&self) {
        self.fail.set(true);
    }

    fn read(&self) -> Result<PinState> {
        if self.fail.get() {
            return Err(Error::Resource {
                line: self.line,
                op: "read value",
                source: io::Error::other("line broken"),
            });
        }
        self.reads.set(self.reads.get() + 1);
        Ok(self.level.get())
    }
}

impl ErrorType for MockLine {
    type Error = Error;
}

impl InputPin for MockLine {
    fn is_high(&mut self) -> Result<bool> {
        Ok(self.read()? == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool> {
        Ok(self.read()? == PinState::Low)
    }
}

/// One wake-up of the scripted waiter: the level changes applied to lines
/// (by index, in order) before the wait returns. Every line touched is
/// reported ready, so a line flipped and flipped back is a bounce.
pub type Wake = Vec<(usize, PinState)>;

/// Plays a fixed list of wake-ups, then fails like a broken `poll`.
#[derive(Clone, Default)]
pub struct ScriptedWaiter {
    wakes: Rc<RefCell<VecDeque<Wake>>>,
    waits: Rc<Cell<usize>>,
}

impl ScriptedWaiter {
    pub fn new(wakes: impl IntoIterator<Item = Wake>) -> Self {
        Self {
            wakes: Rc::new(RefCell::new(wakes.into_iter().collect())),
            waits: Rc::new(Cell::new(0)),
        }
    }

    pub fn push(&self, wake: Wake) {
        self.wakes.borrow_mut().push_back(wake);
    }

    /// Number of completed waits
    pub fn waits(&self) -> usize {
        self.waits.get()
    }

    pub fn pending(&self) -> usize {
        self.wakes.borrow().len()
    }
}

impl EdgeWaiter<MockLine> for ScriptedWaiter {
    fn wait(&mut self, lines: &[MockLine], ready: &mut [bool]) -> Result<()> {
        assert_eq!(lines.len(), ready.len());
        assert!(ready.iter().all(|r| !r), "waiting while lines are still flagged ready");

        let wake = self
            .wakes
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Wait(io::Error::other("script exhausted")))?;
        for (idx, level) in wake {
            lines[idx].set_level(level);
            ready[idx] = true;
        }
        self.waits.set(self.waits.get() + 1);
        Ok(())
    }
}

pub type TestBank = InputBank<MockLine, ScriptedWaiter, SettleDebouncer>;

/// A bank over `keys`, every line released (raw high), active low, no settle
/// delay. Lines are numbered from 100 in key order.
pub fn create_test_bank(keys: &[KeyCode], waiter: &ScriptedWaiter) -> (TestBank, Vec<MockLine>) {
    let lines: Vec<MockLine> = (0..keys.len())
        .map(|idx| MockLine::new(100 + idx as u32, PinState::High))
        .collect();
    let bank = InputBank::new(
        keys.iter()
            .zip(&lines)
            .map(|(&key, line)| (line.line, key, line.clone())),
        waiter.clone(),
        SettleDebouncer::new(core::time::Duration::ZERO),
        true,
    )
    .unwrap();
    (bank, lines)
}

pub fn press(idx: usize) -> Wake {
    vec![(idx, PinState::Low)]
}

pub fn release(idx: usize) -> Wake {
    vec![(idx, PinState::High)]
}
