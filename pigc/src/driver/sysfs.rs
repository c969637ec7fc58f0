use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::os::fd::{AsFd, BorrowedFd};
use std::path::{Path, PathBuf};

use embedded_hal::digital::{ErrorType, InputPin, PinState};
use log::{debug, warn};

use super::LineId;
use crate::error::{Error, Result};

/// Default mount point of the sysfs GPIO class
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// A GPIO line driven through the legacy sysfs interface.
///
/// Opening a line exports it (when not already exported), configures it as an
/// input with both-edge notification and keeps its `value` file open. The open
/// file is what gets polled for `POLLPRI`. Dropping the line unexports it.
#[derive(Debug)]
pub struct SysfsLine {
    root: PathBuf,
    line: LineId,
    value: File,
}

impl SysfsLine {
    /// Export and configure `line` under `root`, then open its value file.
    pub fn open(root: impl AsRef<Path>, line: LineId) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        export(&root, line)?;
        match configure(&root, line) {
            Ok(value) => {
                debug!("gpio{line}: configured as input, both edges");
                Ok(Self { root, line, value })
            }
            Err(e) => {
                release(&root, line);
                Err(e)
            }
        }
    }

    /// Seek to the start of the value file and read the level character.
    pub fn read_level(&mut self) -> Result<PinState> {
        let line = self.line;
        let mut byte = [0u8; 1];
        self.value
            .seek(SeekFrom::Start(0))
            .map_err(|source| Error::Resource { line, op: "seek value", source })?;
        self.value
            .read_exact(&mut byte)
            .map_err(|source| Error::Resource { line, op: "read value", source })?;
        Ok(if byte[0] == b'0' { PinState::Low } else { PinState::High })
    }
}

impl ErrorType for SysfsLine {
    type Error = Error;
}

impl InputPin for SysfsLine {
    fn is_high(&mut self) -> Result<bool> {
        Ok(self.read_level()? == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool> {
        Ok(self.read_level()? == PinState::Low)
    }
}

impl AsFd for SysfsLine {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.value.as_fd()
    }
}

impl Drop for SysfsLine {
    fn drop(&mut self) {
        release(&self.root, self.line);
    }
}

fn line_dir(root: &Path, line: LineId) -> PathBuf {
    root.join(format!("gpio{line}"))
}

fn export(root: &Path, line: LineId) -> Result<()> {
    if line_dir(root, line).exists() {
        return Ok(());
    }
    fs::write(root.join("export"), line.to_string())
        .map_err(|source| Error::LineConfiguration { line, op: "export", source })
}

fn configure(root: &Path, line: LineId) -> Result<File> {
    let dir = line_dir(root, line);
    fs::write(dir.join("direction"), "in")
        .map_err(|source| Error::LineConfiguration { line, op: "set direction", source })?;
    fs::write(dir.join("edge"), "both")
        .map_err(|source| Error::LineConfiguration { line, op: "set edge", source })?;
    File::open(dir.join("value")).map_err(|source| Error::Resource { line, op: "open value", source })
}

/// Unexport `line` if it is still exported. Failures are only logged, this
/// runs on teardown paths.
fn release(root: &Path, line: LineId) {
    if !line_dir(root, line).exists() {
        return;
    }
    if let Err(e) = unexport(root, line) {
        warn!("gpio{line}: unexport failed: {e}");
    }
}

fn unexport(root: &Path, line: LineId) -> io::Result<()> {
    fs::write(root.join("unexport"), line.to_string())
}
