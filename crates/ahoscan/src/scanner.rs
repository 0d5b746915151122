// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner facade.
//!
//! A [`Scanner`] pairs a shared, immutable [`Automaton`] with the pattern
//! list it was built from and reports matches as the caller's original
//! patterns. Cloning a scanner copies two reference counts; the transition
//! table is never rebuilt or copied. Every clone is a distinct handle and
//! compares unequal to the scanner it came from.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::automaton::{Automaton, Match};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::packed;
use crate::pattern::{CaseFold, Pattern, PatternSet};
use crate::trie::MAX_STATES;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

fn next_handle() -> u64 {
    NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
}

/// Query input, resolved to bytes before it reaches the scan loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// UTF-8 text, scanned as its bytes.
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
}

impl Input<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Text(s) => s.as_bytes(),
            Input::Bytes(b) => b,
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Input::Bytes(Cow::Borrowed(b))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Input::Bytes(Cow::Borrowed(b))
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Input::Bytes(Cow::Borrowed(b))
    }
}

/// Resolve a dynamically typed value: a string is text, an array of
/// integers in `0..=255` is bytes, anything else is an argument error.
impl<'a> TryFrom<&'a serde_json::Value> for Input<'a> {
    type Error = Error;

    fn try_from(value: &'a serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Input::Text(Cow::Borrowed(s))),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| Error::Argument(format!("{item} is not a byte value")))
                })
                .collect::<Result<Vec<u8>>>()
                .map(|bytes| Input::Bytes(Cow::Owned(bytes))),
            other => Err(Error::Argument(format!("unsupported input {}", kind_of(other)))),
        }
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug)]
pub struct Scanner {
    handle: u64,
    automaton: Arc<Automaton>,
    patterns: Arc<PatternSet>,
}

impl Scanner {
    /// Build a scanner over `patterns` with default matching options.
    pub fn new<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Self::builder().patterns(patterns).build()
    }

    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::default()
    }

    /// Pair an already compiled automaton, e.g. one loaded with
    /// [`Automaton::from_bytes`], with the patterns it was compiled from.
    /// The pattern count and every pattern's length must match the tables.
    pub fn with_automaton<I, P>(automaton: Arc<Automaton>, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let patterns = PatternSet::new(patterns, automaton.fold());
        if patterns.len() != automaton.pattern_count() {
            return Err(Error::Corrupt(format!(
                "automaton was built from {} patterns, got {}",
                automaton.pattern_count(),
                patterns.len()
            )));
        }
        if let Some(bad) = patterns
            .iter()
            .find(|p| automaton.pattern_len(p.id()) != Some(p.len()))
        {
            return Err(Error::Corrupt(format!(
                "pattern {} has length {}, automaton expects {:?}",
                bad.id(),
                bad.len(),
                automaton.pattern_len(bad.id())
            )));
        }
        Ok(Self {
            handle: next_handle(),
            automaton,
            patterns: Arc::new(patterns),
        })
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn automaton(&self) -> &Arc<Automaton> {
        &self.automaton
    }

    /// Whether both scanners read the same compiled table.
    pub fn shares_automaton(&self, other: &Scanner) -> bool {
        Arc::ptr_eq(&self.automaton, &other.automaton)
    }

    /// Patterns occurring in `input`, in pattern-list order, or `None` if
    /// none occur.
    pub fn is_suspicious<'a>(&self, input: impl Into<Input<'a>>) -> Option<Vec<&Pattern>> {
        let input = input.into();
        let ids = self.automaton.suspicious(input.as_bytes())?;
        Some(ids.into_iter().filter_map(|id| self.patterns.get(id)).collect())
    }

    /// [`Scanner::is_suspicious`] for a dynamically typed input.
    pub fn is_suspicious_value(&self, value: &serde_json::Value) -> Result<Option<Vec<&Pattern>>> {
        let input = Input::try_from(value)?;
        Ok(self.is_suspicious(input))
    }

    /// Whether any pattern occurs in `input`. Stops at the first hit.
    pub fn is_match<'a>(&self, input: impl Into<Input<'a>>) -> bool {
        self.automaton.is_match(input.into().as_bytes())
    }

    /// Every occurrence of every pattern in `input`.
    pub fn find_all<'a>(&self, input: impl Into<Input<'a>>) -> Vec<Match> {
        self.automaton.find_all(input.into().as_bytes())
    }
}

impl Clone for Scanner {
    fn clone(&self) -> Self {
        let handle = next_handle();
        tracing::debug!(from = self.handle, to = handle, "cloned scanner");
        Self {
            handle,
            automaton: Arc::clone(&self.automaton),
            patterns: Arc::clone(&self.patterns),
        }
    }
}

/// Handles compare by identity.
impl PartialEq for Scanner {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Scanner {}

/// Collects a pattern source and matching options for a [`Scanner`].
#[derive(Debug, Clone)]
pub struct ScannerBuilder {
    patterns: Option<Vec<Vec<u8>>>,
    fold: CaseFold,
    max_states: usize,
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self {
            patterns: None,
            fold: CaseFold::default(),
            max_states: MAX_STATES,
        }
    }
}

impl ScannerBuilder {
    /// Use an ordered pattern list. An empty list is valid and never matches.
    pub fn patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.patterns = Some(patterns.into_iter().map(|p| p.as_ref().to_vec()).collect());
        self
    }

    /// Use a NUL-delimited buffer (see [`crate::PackedPatterns`]).
    pub fn packed(mut self, buf: &[u8]) -> Self {
        self.patterns = Some(packed::decode(buf).into_iter().map(<[u8]>::to_vec).collect());
        self
    }

    pub fn case_fold(mut self, fold: CaseFold) -> Self {
        self.fold = fold;
        self
    }

    pub fn max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Apply matching options and, if present, the inline pattern list.
    pub fn config(mut self, config: &Config) -> Self {
        self.fold = config.matching.case_fold;
        self.max_states = config.matching.max_states();
        if let Some(list) = &config.patterns.list {
            self = self.patterns(list);
        }
        self
    }

    pub fn build(self) -> Result<Scanner> {
        let patterns = self.patterns.ok_or(Error::MissingPatterns)?;
        let patterns = PatternSet::new(patterns, self.fold);
        let automaton = Automaton::with_max_states(&patterns, self.max_states)?;
        let scanner = Scanner {
            handle: next_handle(),
            automaton: Arc::new(automaton),
            patterns: Arc::new(patterns),
        };
        tracing::debug!(handle = scanner.handle, "built scanner");
        Ok(scanner)
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
