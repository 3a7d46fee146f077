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

//! hushpass - read a password from the terminal
//!
//! Keystrokes are taken one byte at a time with terminal echo switched off,
//! then shown as nothing, as mask glyphs, or verbatim.  Redirected input
//! (pipes, files, in-memory readers) goes through the same loop without any
//! terminal mode changes.
//!
//! ```no_run
//! let secret = hushpass::acquire_masked().expect("no password");
//! assert!(!secret.contains(&b'\n'));
//! ```

use std::io::{self, Write};

use zeroize::Zeroizing;

mod acquire;
mod error;
mod input;
mod options;
mod output;
pub mod term;

pub use acquire::acquire;
pub use error::{AcquireError, Error, ModeAction, Result};
#[cfg(unix)]
pub use input::FdSource;
pub use input::{ByteClass, ByteSource, ReaderSource, Stdin};
pub use options::{EchoPolicy, Options, DEFAULT_MASK_GLYPH, DEFAULT_MAX_BYTES};

/// Secret bytes, wiped from memory on drop.  Never includes the terminator.
pub type Secret = Zeroizing<Vec<u8>>;

fn from_stdin(policy: EchoPolicy) -> std::result::Result<Secret, AcquireError> {
    acquire(&Options::new(policy), Stdin, &mut io::stdout())
}

/// Read a password from stdin without echoing anything.
pub fn acquire_silent() -> std::result::Result<Secret, AcquireError> {
    from_stdin(EchoPolicy::None)
}

/// Read a password from stdin, echoing one `*` per byte.
pub fn acquire_masked() -> std::result::Result<Secret, AcquireError> {
    from_stdin(EchoPolicy::Mask)
}

/// Read a password from stdin, echoing it as typed.
pub fn acquire_echoed() -> std::result::Result<Secret, AcquireError> {
    from_stdin(EchoPolicy::Echo)
}

/// Write `prompt` to `sink`, then read a password from `source`.
/// Echoes `*` per byte if `masked`, nothing otherwise.
pub fn acquire_with_prompt<S, W>(
    prompt: &str,
    masked: bool,
    source: S,
    sink: &mut W,
) -> std::result::Result<Secret, AcquireError>
where
    S: ByteSource,
    W: Write + ?Sized,
{
    let policy = if masked { EchoPolicy::Mask } else { EchoPolicy::None };
    acquire(&Options::new(policy).with_prompt(prompt), source, sink)
}
