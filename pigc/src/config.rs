//! Keymap configuration: which line drives which key.

use core::time::Duration;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::debounce::DEBOUNCE_TIME;
use crate::driver::{LineId, SYSFS_GPIO_ROOT};
use crate::error::{Error, Result};
use crate::input_bank::MAX_CHANNELS;
use crate::keycode::KeyCode;

/// One `(line, key)` binding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinConfig {
    pub line: LineId,
    pub key: KeyCode,
}

impl PinConfig {
    pub const fn new(line: u32, key: KeyCode) -> Self {
        Self { line: LineId(line), key }
    }
}

/// Process-level configuration of the input bank.
///
/// Loaded once at start from a TOML file, or the built-in table of the
/// two-player arcade panel when no file is given:
///
/// ```toml
/// debounce_ms = 5
/// shutdown = ["Kc5", "Escape"]
///
/// [[pins]]
/// line = 4
/// key = "Down"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeymapConfig {
    /// Mount point of the sysfs GPIO class
    pub sysfs_root: PathBuf,
    /// Settle time between an edge and the confirming read
    pub debounce_ms: u64,
    /// Raw low level means pressed (pull-up wiring)
    pub active_low: bool,
    /// Keys which, held together, trigger the shutdown action
    pub shutdown: [KeyCode; 2],
    /// Bindings, in scan order
    pub pins: Vec<PinConfig>,
}

/// Built-in pin table
pub const DEFAULT_PINS: [PinConfig; 18] = [
    // player 1 controls
    PinConfig::new(4, KeyCode::Down),
    PinConfig::new(15, KeyCode::Up),
    PinConfig::new(17, KeyCode::Right),
    PinConfig::new(18, KeyCode::Left),
    PinConfig::new(27, KeyCode::Enter), // green
    PinConfig::new(22, KeyCode::LAlt),  // blue
    PinConfig::new(23, KeyCode::Space), // yellow
    PinConfig::new(19, KeyCode::Kc1),   // 1-player
    PinConfig::new(16, KeyCode::Kc2),   // 2-player
    PinConfig::new(26, KeyCode::Kc5),   // side button (coin)
    PinConfig::new(20, KeyCode::Escape), // side button (esc)
    // player 2 controls
    PinConfig::new(24, KeyCode::F),
    PinConfig::new(10, KeyCode::R),
    PinConfig::new(9, KeyCode::G),
    PinConfig::new(25, KeyCode::D),
    PinConfig::new(11, KeyCode::A),
    PinConfig::new(8, KeyCode::S),
    PinConfig::new(7, KeyCode::Q),
];

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(SYSFS_GPIO_ROOT),
            debounce_ms: DEBOUNCE_TIME.as_millis() as u64,
            active_low: true,
            shutdown: [KeyCode::Kc5, KeyCode::Escape],
            pins: DEFAULT_PINS.to_vec(),
        }
    }
}

impl KeymapConfig {
    /// Read and validate a keymap file. Fields missing from the file keep
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::KeymapFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check the table can back an input bank: non-empty, bounded, and no line
    /// or key bound twice.
    pub fn validate(&self) -> Result<()> {
        if self.pins.is_empty() {
            return Err(Error::Configuration("keymap has no pins".into()));
        }
        if self.pins.len() > MAX_CHANNELS {
            return Err(Error::Configuration(format!(
                "keymap has {} pins, at most {MAX_CHANNELS} are supported",
                self.pins.len()
            )));
        }
        let mut lines = HashSet::new();
        let mut keys = HashSet::new();
        for pin in &self.pins {
            if !lines.insert(pin.line) {
                return Err(Error::Configuration(format!("gpio{} is bound twice", pin.line)));
            }
            if !keys.insert(pin.key) {
                return Err(Error::Configuration(format!("{:?} is bound twice", pin.key)));
            }
        }
        Ok(())
    }
}
