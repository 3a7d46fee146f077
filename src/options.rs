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

//! Acquisition settings.

use std::fmt;

/// Ceiling on bytes consumed by one acquisition, terminator search included.
pub const DEFAULT_MAX_BYTES: usize = 512;
pub const DEFAULT_MASK_GLYPH: u8 = b'*';

/// What the user sees for each accepted byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoPolicy {
    /// Nothing at all.
    #[default]
    None,
    /// One mask glyph per byte.
    Mask,
    /// The byte itself.
    Echo,
}

impl fmt::Display for EchoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EchoPolicy::None => f.write_str("none"),
            EchoPolicy::Mask => f.write_str("mask"),
            EchoPolicy::Echo => f.write_str("echo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub policy: EchoPolicy,
    /// Zero is treated as one.
    pub max_bytes: usize,
    pub mask_glyph: u8,
    /// Written before reading starts; empty means no prompt.
    pub prompt: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            policy: EchoPolicy::None,
            max_bytes: DEFAULT_MAX_BYTES,
            mask_glyph: DEFAULT_MASK_GLYPH,
            prompt: String::new(),
        }
    }
}

impl Options {
    pub fn new(policy: EchoPolicy) -> Self {
        Options {
            policy,
            ..Options::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_mask_glyph(mut self, glyph: u8) -> Self {
        self.mask_glyph = glyph;
        self
    }

    pub(crate) fn limit(&self) -> usize {
        self.max_bytes.max(1)
    }
}
