//! Blocking multiplexed wait for line edges.

use std::io;
use std::os::fd::{AsFd, AsRawFd};

use crate::error::{Error, Result};

/// Waits until at least one line reports an edge.
///
/// Each call registers every line again: the underlying notification is
/// one-shot per edge, so a line that is not re-armed is no longer monitored.
pub trait EdgeWaiter<In> {
    /// Block until one or more lines are ready and set `ready[i]` for each of
    /// them. `ready` has the same length as `lines`.
    fn wait(&mut self, lines: &[In], ready: &mut [bool]) -> Result<()>;
}

/// `poll(2)` on the lines' value files for `POLLPRI`, without timeout.
#[derive(Default)]
pub struct PollWaiter {
    fds: Vec<libc::pollfd>,
}

impl PollWaiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<In: AsFd> EdgeWaiter<In> for PollWaiter {
    fn wait(&mut self, lines: &[In], ready: &mut [bool]) -> Result<()> {
        self.fds.clear();
        self.fds.extend(lines.iter().map(|line| libc::pollfd {
            fd: line.as_fd().as_raw_fd(),
            events: libc::POLLPRI,
            revents: 0,
        }));

        // SAFETY: `fds` holds `fds.len()` initialized entries and every fd is
        // borrowed from a line that outlives the call.
        let rc = unsafe { libc::poll(self.fds.as_mut_ptr(), self.fds.len() as libc::nfds_t, -1) };
        if rc < 0 {
            return Err(Error::Wait(io::Error::last_os_error()));
        }

        for (flag, fd) in ready.iter_mut().zip(&self.fds) {
            *flag = fd.revents & libc::POLLPRI != 0;
        }
        Ok(())
    }
}
