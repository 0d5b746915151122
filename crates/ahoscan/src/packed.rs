// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! NUL-delimited pattern buffers for crossing a call boundary in one transfer.
//!
//! Wire format: every pattern is followed by a single `0x00` byte, which is
//! the same as joining the list plus one trailing empty entry with NUL. The
//! trailing empty entry is a terminator and never becomes a pattern, so
//! pattern ids line up with the sender's list. Empty segments before the
//! terminator are real (empty) patterns.
//!
//! ```text
//! ["he", "", "she"]  <->  68 65 00 00 73 68 65 00
//! ```

use crate::error::{Error, Result};

pub const DELIMITER: u8 = 0x00;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedPatterns {
    buf: Vec<u8>,
}

impl PackedPatterns {
    /// Pack `patterns`, failing on any pattern that contains the delimiter.
    pub fn encode<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut buf = Vec::new();
        for (index, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.as_ref();
            if memchr::memchr(DELIMITER, pattern).is_some() {
                return Err(Error::PatternContainsNul { index });
            }
            buf.extend_from_slice(pattern);
            buf.push(DELIMITER);
        }
        Ok(Self { buf })
    }

    /// Wrap a buffer received from the other side of the boundary.
    pub fn from_bytes(buf: impl Into<Vec<u8>>) -> Self {
        Self { buf: buf.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Split the buffer back into patterns.
    ///
    /// A final empty segment is the terminator and is dropped. A buffer
    /// without a trailing NUL is accepted; its last segment is a pattern.
    pub fn decode(&self) -> Vec<&[u8]> {
        decode(&self.buf)
    }
}

pub(crate) fn decode(buf: &[u8]) -> Vec<&[u8]> {
    let mut patterns = Vec::new();
    let mut start = 0;
    for end in memchr::memchr_iter(DELIMITER, buf) {
        patterns.push(&buf[start..end]);
        start = end + 1;
    }
    if start < buf.len() {
        patterns.push(&buf[start..]);
    }
    patterns
}

#[cfg(test)]
#[path = "packed_tests.rs"]
mod tests;
