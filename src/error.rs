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

//! Error types for secret acquisition.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::Secret;

/// Which terminal mode transition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Capturing the current attributes or switching to raw mode.
    Enter,
    /// Reapplying the captured attributes.
    Restore,
}

impl fmt::Display for ModeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAction::Enter => f.write_str("enter raw mode"),
            ModeAction::Restore => f.write_str("restore terminal mode"),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The byte source failed or reached end-of-stream before a line terminator.
    #[error("failed to read secret: {0}")]
    ReadFailure(#[source] io::Error),

    /// An interrupt byte (ETX, Ctrl-C) was received.
    #[error("interrupted")]
    Interrupted,

    /// More than `limit` bytes were consumed without a line terminator.
    #[error("maximum byte limit ({limit}) exceeded")]
    MaxLengthExceeded { limit: usize },

    /// The terminal could not be switched into or out of raw mode.
    #[error("failed to {action}: {source}")]
    ModeTransition {
        action: ModeAction,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn mode(action: ModeAction, source: io::Error) -> Self {
        Error::ModeTransition { action, source }
    }
}

/// A failed acquisition together with whatever was collected before it stopped.
///
/// The partial secret is kept for inspection only; it should never be used to
/// authenticate. It is wiped from memory when this value is dropped.
#[derive(Error)]
#[error("{error}")]
pub struct AcquireError {
    #[source]
    error: Error,
    partial: Secret,
}

impl AcquireError {
    pub(crate) fn new(error: Error, partial: Secret) -> Self {
        Self { error, partial }
    }

    /// The reason acquisition stopped.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Bytes accumulated before the failure.
    pub fn partial(&self) -> &[u8] {
        &self.partial
    }

    pub fn into_parts(self) -> (Error, Secret) {
        (self.error, self.partial)
    }
}

// Hand-written so the partial secret never ends up in logs or panic messages.
impl fmt::Debug for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquireError")
            .field("error", &self.error)
            .field("partial_len", &self.partial.len())
            .finish()
    }
}

impl From<AcquireError> for Error {
    fn from(err: AcquireError) -> Self {
        err.error
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use zeroize::Zeroizing;

    #[test]
    fn test_max_length_message_names_limit() {
        let err = Error::MaxLengthExceeded { limit: 512 };
        assert_eq!(err.to_string(), "maximum byte limit (512) exceeded");
    }

    #[test]
    fn test_mode_transition_keeps_source() {
        let err = Error::mode(
            ModeAction::Restore,
            io::Error::new(io::ErrorKind::Other, "device revoked"),
        );
        assert_eq!(err.to_string(), "failed to restore terminal mode: device revoked");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_acquire_error_debug_hides_partial() {
        let err = AcquireError::new(Error::Interrupted, Zeroizing::new(b"hunter2".to_vec()));
        let debug = format!("{:?}", err);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("partial_len: 7"));
        assert_eq!(err.to_string(), "interrupted");
        let inner = err.source().and_then(|s| s.downcast_ref::<Error>());
        assert!(matches!(inner, Some(Error::Interrupted)));
    }

    #[test]
    fn test_acquire_error_into_parts() {
        let err = AcquireError::new(
            Error::MaxLengthExceeded { limit: 2 },
            Zeroizing::new(b"ab".to_vec()),
        );
        assert_eq!(err.partial(), b"ab");
        let (error, partial) = err.into_parts();
        assert!(matches!(error, Error::MaxLengthExceeded { limit: 2 }));
        assert_eq!(&*partial, b"ab");
    }
}
