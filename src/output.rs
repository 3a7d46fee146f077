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

//! On-screen feedback while a secret is typed.
//!
//! Everything here is best-effort: a sink that stops accepting writes must
//! not cost the user their secret, so failures are logged and dropped.

use std::io::Write;

use crate::options::EchoPolicy;

/// Back up one column, blank it, back up again.
pub const ERASE_GLYPH: &[u8] = b"\x08 \x08";
pub const NEWLINE: &[u8] = b"\n";

/// Feedback writer bound to one acquisition's policy.
pub struct Feedback<'a, W: Write + ?Sized> {
    sink: &'a mut W,
    policy: EchoPolicy,
    mask: u8,
}

impl<'a, W: Write + ?Sized> Feedback<'a, W> {
    pub fn new(sink: &'a mut W, policy: EchoPolicy, mask: u8) -> Self {
        Feedback { sink, policy, mask }
    }

    pub fn prompt(&mut self, text: &str) {
        if !text.is_empty() {
            self.emit(text.as_bytes());
        }
    }

    /// An accepted byte.
    pub fn accepted(&mut self, b: u8) {
        match self.policy {
            EchoPolicy::None => {}
            EchoPolicy::Mask => self.emit(&[self.mask]),
            EchoPolicy::Echo => self.emit(&[b]),
        }
    }

    /// One byte removed from a non-empty buffer.
    pub fn erased(&mut self) {
        if self.policy != EchoPolicy::None {
            self.emit(ERASE_GLYPH);
        }
    }

    /// Close the input line.
    pub fn finish(&mut self) {
        self.emit(NEWLINE);
    }

    fn emit(&mut self, bytes: &[u8]) {
        let res = self.sink.write_all(bytes).and_then(|_| self.sink.flush());
        if let Err(err) = res {
            tracing::debug!(%err, "feedback write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_none_policy_is_silent() {
        let mut out = Vec::new();
        let mut fb = Feedback::new(&mut out, EchoPolicy::None, b'*');
        fb.accepted(b'a');
        fb.erased();
        assert!(out.is_empty());
    }

    #[test]
    fn test_mask_policy_writes_glyph() {
        let mut out = Vec::new();
        let mut fb = Feedback::new(&mut out, EchoPolicy::Mask, b'#');
        fb.accepted(b'a');
        fb.accepted(b'b');
        fb.erased();
        fb.finish();
        assert_eq!(out, b"##\x08 \x08\n");
    }

    #[test]
    fn test_echo_policy_writes_byte() {
        let mut out = Vec::new();
        let mut fb = Feedback::new(&mut out, EchoPolicy::Echo, b'*');
        fb.prompt("pw: ");
        fb.accepted(b'q');
        assert_eq!(out, b"pw: q");
    }

    #[test]
    fn test_empty_prompt_writes_nothing() {
        let mut out = Vec::new();
        Feedback::new(&mut out, EchoPolicy::Mask, b'*').prompt("");
        assert!(out.is_empty());
    }

    #[test]
    fn test_failing_sink_is_tolerated() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = Broken;
        let mut fb = Feedback::new(&mut sink, EchoPolicy::Echo, b'*');
        fb.accepted(b'a');
        fb.finish();
    }
}
