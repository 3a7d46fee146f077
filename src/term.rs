// Copyright 2026 Daniel Smith
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Terminal mode control: detection, raw-mode entry, and restore.
//!
//! POSIX termios via libc on unix.  Other targets never report a terminal,
//! so acquisition there always takes the redirected-stream path.

use crate::error::Result;

#[cfg(unix)]
pub type Descriptor = std::os::unix::io::RawFd;
#[cfg(not(unix))]
pub type Descriptor = i32;

pub use imp::{enter_raw_mode, is_terminal, restore_mode, ModeSnapshot};

#[cfg(unix)]
mod imp {
    use std::io;
    use std::mem::MaybeUninit;

    use super::Descriptor;
    use crate::error::{Error, ModeAction, Result};

    /// Terminal attributes captured before entering raw mode.
    pub struct ModeSnapshot {
        fd: Descriptor,
        orig: libc::termios,
    }

    impl ModeSnapshot {
        pub fn descriptor(&self) -> Descriptor {
            self.fd
        }
    }

    fn cvt(ret: libc::c_int) -> io::Result<()> {
        if ret == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn get_attrs(fd: Descriptor) -> io::Result<libc::termios> {
        let mut term = MaybeUninit::<libc::termios>::uninit();
        cvt(unsafe { libc::tcgetattr(fd, term.as_mut_ptr()) })?;
        Ok(unsafe { term.assume_init() })
    }

    /// Whether `fd` is attached to a terminal device.  Files, pipes and
    /// closed descriptors all answer `false`.
    pub fn is_terminal(fd: Descriptor) -> bool {
        unsafe { libc::isatty(fd) == 1 }
    }

    /// Turn off echo, canonical (line-buffered) input and signal
    /// generation on `fd`.
    /// Returns the original attributes so they can be restored later.
    pub fn enter_raw_mode(fd: Descriptor) -> Result<ModeSnapshot> {
        let orig = get_attrs(fd).map_err(|e| Error::mode(ModeAction::Enter, e))?;

        let mut raw = orig;

        // Ctrl-C arrives as a 0x03 byte, not SIGINT.  OPOST stays as it was.
        raw.c_lflag &= !(libc::ICANON
            | libc::ISIG
            | libc::ECHO
            | libc::ECHOE
            | libc::ECHOK
            | libc::ECHONL);

        // Read one byte at a time, no timeout
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        // TCSANOW: keep anything already typed ahead
        cvt(unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) })
            .map_err(|e| Error::mode(ModeAction::Enter, e))?;

        Ok(ModeSnapshot { fd, orig })
    }

    /// Reapply the attributes captured by [`enter_raw_mode`].
    pub fn restore_mode(snapshot: &ModeSnapshot) -> Result<()> {
        cvt(unsafe { libc::tcsetattr(snapshot.fd, libc::TCSANOW, &snapshot.orig) })
            .map_err(|e| Error::mode(ModeAction::Restore, e))
    }
}

#[cfg(not(unix))]
mod imp {
    use std::io;

    use super::Descriptor;
    use crate::error::{Error, ModeAction, Result};

    pub struct ModeSnapshot {
        fd: Descriptor,
    }

    impl ModeSnapshot {
        pub fn descriptor(&self) -> Descriptor {
            self.fd
        }
    }

    pub fn is_terminal(_fd: Descriptor) -> bool {
        false
    }

    pub fn enter_raw_mode(_fd: Descriptor) -> Result<ModeSnapshot> {
        Err(Error::mode(
            ModeAction::Enter,
            io::Error::new(
                io::ErrorKind::Unsupported,
                "raw mode is not supported on this platform",
            ),
        ))
    }

    pub fn restore_mode(_snapshot: &ModeSnapshot) -> Result<()> {
        Ok(())
    }
}

/// Holds a terminal in raw mode for the duration of one acquisition.
///
/// Call [`RawModeGuard::restore`] to put the terminal back and learn whether
/// that worked.  A guard dropped without it (unwinding out of a panic, say)
/// still restores, silently.
pub struct RawModeGuard {
    snapshot: Option<ModeSnapshot>,
}

impl RawModeGuard {
    pub fn enter(fd: Descriptor) -> Result<Self> {
        let snapshot = enter_raw_mode(fd)?;
        tracing::debug!(fd, "terminal raw mode enabled");
        Ok(Self {
            snapshot: Some(snapshot),
        })
    }

    pub fn restore(mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => {
                restore_mode(&snapshot)?;
                tracing::debug!(fd = snapshot.descriptor(), "terminal mode restored");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Err(err) = restore_mode(&snapshot) {
                tracing::warn!(%err, "terminal mode restore on drop failed");
            }
        }
    }
}
