//! Drivers for the physical input lines.

pub mod sysfs;

use core::fmt;

use embedded_hal::digital::{InputPin, PinState};
use serde::Deserialize;

use crate::error::{Error, Result};

pub use sysfs::{SYSFS_GPIO_ROOT, SysfsLine};

/// Identifier of a physical line, the kernel GPIO number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the raw electrical level of an input pin.
pub fn read_level<In>(line: &mut In) -> Result<PinState>
where
    In: InputPin,
    In::Error: Into<Error>,
{
    line.is_high().map(PinState::from).map_err(Into::into)
}
