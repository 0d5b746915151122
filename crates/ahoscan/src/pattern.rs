// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical, indexed pattern lists.
//!
//! Patterns keep the bytes the caller supplied so matches can be reported
//! back verbatim. Case folding is a property of the whole set: the same
//! [`CaseFold`] is applied to every pattern byte at trie insertion and to
//! every input byte at scan time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a pattern in the caller's list.
pub type PatternId = usize;

/// Byte normalization applied uniformly to patterns and scanned input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseFold {
    /// ASCII letters compare case-insensitively; all other bytes are exact.
    #[default]
    Ascii,
    /// Bytes compare exactly.
    #[serde(rename = "none")]
    Exact,
}

impl CaseFold {
    /// Map a byte to its canonical form under this policy.
    #[inline]
    pub fn fold(self, byte: u8) -> u8 {
        match self {
            CaseFold::Ascii => byte.to_ascii_lowercase(),
            CaseFold::Exact => byte,
        }
    }
}

impl fmt::Display for CaseFold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseFold::Ascii => f.write_str("ascii"),
            CaseFold::Exact => f.write_str("none"),
        }
    }
}

/// A single pattern and its index in the set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    id: PatternId,
    bytes: Box<[u8]>,
}

impl Pattern {
    pub fn id(&self) -> PatternId {
        self.id
    }

    /// The pattern exactly as supplied, before folding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The pattern as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

/// Ordered pattern list, indexed `0..n`.
///
/// Duplicates and empty patterns are kept as given. An empty pattern matches
/// at every position of every input, including the empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    fold: CaseFold,
}

impl PatternSet {
    pub fn new<I, P>(patterns: I, fold: CaseFold) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let patterns = patterns
            .into_iter()
            .enumerate()
            .map(|(id, p)| Pattern {
                id,
                bytes: p.as_ref().into(),
            })
            .collect();
        Self { patterns, fold }
    }

    pub fn fold(&self) -> CaseFold {
        self.fold
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Total pattern bytes, an upper bound on non-root trie states.
    pub fn total_len(&self) -> usize {
        self.patterns.iter().map(Pattern::len).sum()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
