// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The compiled matching machine.
//!
//! An [`Automaton`] is immutable once built. Every state has a transition for
//! each of the 256 byte values, so scanning `L` bytes costs exactly `L` table
//! lookups with no backtracking. Output sets already include everything
//! inherited through failure links.
//!
//! All query methods take `&self` and keep their cursor on the stack, so one
//! automaton can serve any number of concurrent readers.

use std::collections::{BTreeSet, VecDeque};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::compile;
use crate::error::{Error, Result};
use crate::pattern::{CaseFold, PatternId, PatternSet};
use crate::trie::{self, MAX_STATES, ROOT, StateId};

/// Number of byte values, and the width of one transition row.
pub const ALPHABET: usize = 256;

/// One occurrence of a pattern in scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub pattern: PatternId,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    fold: CaseFold,
    /// Length of each pattern, indexed by pattern id.
    pattern_lens: Vec<usize>,
    /// Row-major `state * ALPHABET + byte` table.
    transitions: Vec<StateId>,
    fail: Vec<StateId>,
    /// Ascending pattern ids per state, failure-link outputs included.
    outputs: Vec<Vec<PatternId>>,
}

impl Automaton {
    /// Compile `patterns` with no limit beyond what a [`StateId`] can address.
    pub fn new(patterns: &PatternSet) -> Result<Self> {
        Self::with_max_states(patterns, MAX_STATES)
    }

    /// Compile `patterns`, failing if the trie would need more than
    /// `max_states` states (root included).
    pub fn with_max_states(patterns: &PatternSet, max_states: usize) -> Result<Self> {
        let trie = trie::build(patterns, max_states)?;
        let automaton = compile::compile(&trie, patterns);
        tracing::debug!(
            patterns = patterns.len(),
            states = automaton.state_count(),
            fold = %patterns.fold(),
            "compiled automaton"
        );
        Ok(automaton)
    }

    pub(crate) fn from_parts(
        fold: CaseFold,
        pattern_lens: Vec<usize>,
        transitions: Vec<StateId>,
        fail: Vec<StateId>,
        outputs: Vec<Vec<PatternId>>,
    ) -> Self {
        Self {
            fold,
            pattern_lens,
            transitions,
            fail,
            outputs,
        }
    }

    pub fn fold(&self) -> CaseFold {
        self.fold
    }

    pub fn state_count(&self) -> usize {
        self.fail.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Length of pattern `id` as compiled, if `id` is in range.
    pub fn pattern_len(&self, id: PatternId) -> Option<usize> {
        self.pattern_lens.get(id).copied()
    }

    /// Raw table lookup. `byte` is used as given; callers scanning text
    /// should fold it first with [`Automaton::fold`].
    #[inline]
    pub fn next_state(&self, state: StateId, byte: u8) -> StateId {
        self.transitions[state as usize * ALPHABET + byte as usize]
    }

    pub fn fail(&self, state: StateId) -> StateId {
        self.fail[state as usize]
    }

    /// Patterns recognized on entering `state`, in ascending id order.
    pub fn output(&self, state: StateId) -> &[PatternId] {
        &self.outputs[state as usize]
    }

    /// Drive the table over `bytes`, calling `visit(end, outputs)` for the
    /// start state (`end == 0`) and after every byte whose state has
    /// non-empty output. Stops early when `visit` returns `false`.
    fn scan<F>(&self, bytes: &[u8], mut visit: F)
    where
        F: FnMut(usize, &[PatternId]) -> bool,
    {
        let root = self.output(ROOT);
        if !root.is_empty() && !visit(0, root) {
            return;
        }
        let mut state = ROOT;
        for (pos, &b) in bytes.iter().enumerate() {
            state = self.next_state(state, self.fold.fold(b));
            let out = &self.outputs[state as usize];
            if !out.is_empty() && !visit(pos + 1, out) {
                return;
            }
        }
    }

    /// Every pattern id occurring anywhere in `bytes`.
    pub fn matches(&self, bytes: &[u8]) -> BTreeSet<PatternId> {
        let mut found = BTreeSet::new();
        self.scan(bytes, |_, out| {
            found.extend(out.iter().copied());
            true
        });
        found
    }

    /// Ascending, de-duplicated ids of the patterns occurring in `bytes`, or
    /// `None` when nothing matched.
    pub fn suspicious(&self, bytes: &[u8]) -> Option<Vec<PatternId>> {
        let mut seen = vec![false; self.pattern_count()];
        let mut found = Vec::new();
        self.scan(bytes, |_, out| {
            for &id in out {
                if !seen[id] {
                    seen[id] = true;
                    found.push(id);
                }
            }
            true
        });
        if found.is_empty() {
            return None;
        }
        found.sort_unstable();
        Some(found)
    }

    /// Whether any pattern occurs in `bytes`. Stops at the first hit.
    pub fn is_match(&self, bytes: &[u8]) -> bool {
        let mut hit = false;
        self.scan(bytes, |_, _| {
            hit = true;
            false
        });
        hit
    }

    /// Every occurrence of every pattern, overlaps included, ordered by end
    /// offset and then by pattern id.
    pub fn find_all(&self, bytes: &[u8]) -> Vec<Match> {
        let mut found = Vec::new();
        self.scan(bytes, |end, out| {
            found.extend(out.iter().map(|&pattern| Match {
                pattern,
                start: end.saturating_sub(self.pattern_lens[pattern]),
                end,
            }));
            true
        });
        found
    }

    /// Serialize the compiled tables with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|e| Error::Encode(e.to_string()))
    }

    /// Load tables written by [`Automaton::to_bytes`].
    ///
    /// The decoded tables are checked before use: the table is total with
    /// every target in range, the root fails to itself, every state is
    /// reachable from the root, output sets are ascending and name known
    /// patterns, each output contains its failure target's output, and no
    /// state reports a pattern longer than the state's depth.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let automaton: Self =
            postcard::from_bytes(bytes).map_err(|e| Error::Decode(e.to_string()))?;
        automaton.validate()?;
        Ok(automaton)
    }

    /// Check the structural invariants the scan loop relies on.
    pub(crate) fn validate(&self) -> Result<()> {
        let states = self.fail.len();
        if states == 0 {
            return Err(Error::Corrupt("no root state".to_string()));
        }
        if self.transitions.len() != states * ALPHABET {
            return Err(Error::Corrupt(format!(
                "transition table has {} entries, expected {}",
                self.transitions.len(),
                states * ALPHABET
            )));
        }
        if self.outputs.len() != states {
            return Err(Error::Corrupt(format!(
                "{} output sets for {} states",
                self.outputs.len(),
                states
            )));
        }
        if self.fail[ROOT as usize] != ROOT {
            return Err(Error::Corrupt("root fails to a non-root state".to_string()));
        }
        if let Some(bad) = self
            .transitions
            .iter()
            .chain(self.fail.iter())
            .find(|&&s| s as usize >= states)
        {
            return Err(Error::Corrupt(format!("state {bad} out of range")));
        }
        let patterns = self.pattern_count();
        for (state, out) in self.outputs.iter().enumerate() {
            if out.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::Corrupt(format!("state {state} output is not ascending")));
            }
            if let Some(bad) = out.iter().find(|&&id| id >= patterns) {
                return Err(Error::Corrupt(format!(
                    "state {state} reports pattern {bad} of {patterns}"
                )));
            }
            let inherited = &self.outputs[self.fail[state] as usize];
            if let Some(lost) = inherited.iter().find(|id| out.binary_search(id).is_err()) {
                return Err(Error::Corrupt(format!(
                    "state {state} drops pattern {lost} reported by its failure target"
                )));
            }
        }

        let depths = self.depths();
        for (state, out) in self.outputs.iter().enumerate() {
            let Some(depth) = depths[state] else {
                return Err(Error::Corrupt(format!("state {state} is unreachable")));
            };
            if let Some(&bad) = out.iter().find(|&&id| self.pattern_lens[id] > depth) {
                return Err(Error::Corrupt(format!(
                    "state {state} at depth {depth} reports pattern {bad} of length {}",
                    self.pattern_lens[bad]
                )));
            }
        }
        Ok(())
    }

    /// Shortest distance from the root to each state, `None` if unreachable.
    /// In a completed table this is the state's trie depth.
    fn depths(&self) -> Vec<Option<usize>> {
        let mut depths = vec![None; self.state_count()];
        depths[ROOT as usize] = Some(0);
        let mut queue = VecDeque::from([ROOT]);
        while let Some(state) = queue.pop_front() {
            let next_depth = depths[state as usize].map_or(0, |d| d + 1);
            let row = state as usize * ALPHABET;
            for &next in &self.transitions[row..row + ALPHABET] {
                if depths[next as usize].is_none() {
                    depths[next as usize] = Some(next_depth);
                    queue.push_back(next);
                }
            }
        }
        depths
    }
}

#[cfg(test)]
#[path = "automaton_tests.rs"]
mod tests;
