use std::io;
use std::path::PathBuf;

use crate::driver::LineId;

/// Result alias used across the crate
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors of the input core and its collaborators.
///
/// None of them is recovered from inside the crate: callers are expected to
/// propagate them to a single top-level handler which releases the lines and
/// terminates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid keymap, unknown or duplicate trigger keys
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A line could not be exported or put into input/both-edge mode
    #[error("gpio{line}: cannot {op}")]
    LineConfiguration {
        line: LineId,
        op: &'static str,
        #[source]
        source: io::Error,
    },
    /// The value file of a line could not be opened or read
    #[error("gpio{line}: cannot {op}")]
    Resource {
        line: LineId,
        op: &'static str,
        #[source]
        source: io::Error,
    },
    /// The blocking multiplexed wait failed
    #[error("waiting for gpio edges failed")]
    Wait(#[source] io::Error),
    /// The downstream event sink rejected a key or an event
    #[error("event sink failed")]
    Sink(#[source] io::Error),
    /// The keymap file could not be read
    #[error("cannot read keymap file {}", path.display())]
    KeymapFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The keymap file is not valid TOML for a keymap
    #[error("cannot parse keymap file")]
    KeymapParse(#[from] toml::de::Error),
}

impl Error {
    /// True for every error raised while validating or applying configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::LineConfiguration { .. } | Error::KeymapParse(_) | Error::KeymapFile { .. }
        )
    }
}

// Lets `Error` be the error type of `embedded_hal` input pins.
impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
