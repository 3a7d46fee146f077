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

//! The secret acquisition loop.

use std::io::Write;

use zeroize::Zeroizing;

use crate::error::{AcquireError, Error, Result};
use crate::input::{ByteClass, ByteSource};
use crate::options::{Options, DEFAULT_MAX_BYTES};
use crate::output::Feedback;
use crate::term::{self, RawModeGuard};
use crate::Secret;

/// Read one secret from `source`, giving feedback on `sink`.
///
/// The prompt (if any) is written first.  When the source's descriptor is a
/// terminal it is held in raw mode until the loop ends, however it ends.
/// A single newline is always written last.
///
/// Reading stops at CR or LF; a following LF of a CRLF pair stays in the
/// source.  Backspace and delete drop the last byte, NUL is skipped, ETX
/// aborts with [`Error::Interrupted`].  Every other byte, printable or not,
/// becomes part of the secret.  More than `options.max_bytes` reads without a
/// terminator aborts with [`Error::MaxLengthExceeded`].
///
/// On failure the bytes collected so far are available from the returned
/// [`AcquireError`].
pub fn acquire<S, W>(
    options: &Options,
    mut source: S,
    sink: &mut W,
) -> std::result::Result<Secret, AcquireError>
where
    S: ByteSource,
    W: Write + ?Sized,
{
    let mut feedback = Feedback::new(sink, options.policy, options.mask_glyph);
    feedback.prompt(&options.prompt);

    let guard = match source.descriptor().filter(|&fd| term::is_terminal(fd)) {
        Some(fd) => match RawModeGuard::enter(fd) {
            Ok(guard) => Some(guard),
            Err(err) => {
                feedback.finish();
                return Err(AcquireError::new(err, Zeroizing::new(Vec::new())));
            }
        },
        None => None,
    };

    let (secret, mut outcome) = read_loop(options.limit(), &mut source, &mut feedback);

    if let Some(guard) = guard {
        if let Err(err) = guard.restore() {
            if outcome.is_ok() {
                outcome = Err(err);
            } else {
                tracing::warn!(%err, "terminal restore failed after an earlier error");
            }
        }
    }

    feedback.finish();

    match outcome {
        Ok(()) => Ok(secret),
        Err(err) => Err(AcquireError::new(err, secret)),
    }
}

fn read_loop<S, W>(
    limit: usize,
    source: &mut S,
    feedback: &mut Feedback<'_, W>,
) -> (Secret, Result<()>)
where
    S: ByteSource,
    W: Write + ?Sized,
{
    let mut secret: Secret = Zeroizing::new(Vec::with_capacity(limit.min(DEFAULT_MAX_BYTES)));

    // Counts every read, not just kept bytes, so a source flooding NULs or
    // erases still terminates.
    let mut consumed = 0usize;
    loop {
        consumed += 1;
        if consumed > limit {
            tracing::debug!(limit, "byte limit reached without line terminator");
            return (secret, Err(Error::MaxLengthExceeded { limit }));
        }

        let b = match source.read_byte() {
            Ok(b) => b,
            Err(err) => {
                tracing::debug!(%err, consumed, "byte source failed");
                return (secret, Err(Error::ReadFailure(err)));
            }
        };

        let class = ByteClass::of(b);
        tracing::trace!(?class, "classified input byte");
        match class {
            ByteClass::LineEnd => {
                tracing::debug!(consumed, "line terminator received");
                return (secret, Ok(()));
            }
            ByteClass::Interrupt => {
                tracing::debug!(consumed, "interrupt received");
                return (secret, Err(Error::Interrupted));
            }
            ByteClass::Erase => {
                if secret.pop().is_some() {
                    feedback.erased();
                }
            }
            ByteClass::Ignore => {}
            ByteClass::Ordinary => {
                push_wiped(&mut secret, b, limit);
                feedback.accepted(b);
            }
        }
    }
}

/// Append `b`, growing by hand when full: a plain `Vec` realloc would free
/// the old block without wiping it.
fn push_wiped(secret: &mut Secret, b: u8, limit: usize) {
    if secret.len() == secret.capacity() {
        let cap = secret.capacity().saturating_mul(2).min(limit).max(secret.len() + 1);
        let mut grown: Secret = Zeroizing::new(Vec::with_capacity(cap));
        grown.extend_from_slice(&secret[..]);
        // The old buffer is zeroized as it drops here.
        *secret = grown;
    }
    secret.push(b);
}
