// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Failure-link compilation.
//!
//! Turns a [`Trie`] into a total transition table. States are visited
//! breadth-first, so when a state is reached its failure target is strictly
//! shallower and that target's row is already complete:
//!
//! - `fail(v) = goto(fail(u), b)` for the edge `u --b--> v`, and `ROOT` at depth 1
//! - `output(v) |= output(fail(v))`, so a scan never walks the failure chain
//! - missing edges of `u` copy the row of `fail(u)` (goto completion)

use std::collections::VecDeque;

use crate::automaton::{ALPHABET, Automaton};
use crate::pattern::{PatternId, PatternSet};
use crate::trie::{ROOT, StateId, Trie};

pub(crate) fn compile(trie: &Trie, patterns: &PatternSet) -> Automaton {
    let states = trie.len();
    let mut transitions: Vec<StateId> = vec![ROOT; states * ALPHABET];
    let mut fail: Vec<StateId> = vec![ROOT; states];
    let mut outputs: Vec<Vec<PatternId>> = (0..states)
        .map(|s| trie.output(s as StateId).to_vec())
        .collect();

    let mut queue = VecDeque::with_capacity(states);
    queue.push_back(ROOT);

    while let Some(u) = queue.pop_front() {
        let row = u as usize * ALPHABET;
        let f = fail[u as usize];
        if u != ROOT {
            let fail_row = f as usize * ALPHABET;
            transitions.copy_within(fail_row..fail_row + ALPHABET, row);
        }

        for &(byte, v) in trie.children(u) {
            let target = if u == ROOT {
                ROOT
            } else {
                transitions[f as usize * ALPHABET + byte as usize]
            };
            fail[v as usize] = target;
            if !outputs[target as usize].is_empty() {
                let merged = union_sorted(&outputs[v as usize], &outputs[target as usize]);
                outputs[v as usize] = merged;
            }
            transitions[row + byte as usize] = v;
            queue.push_back(v);
        }
    }

    let automaton = Automaton::from_parts(
        patterns.fold(),
        patterns.iter().map(|p| p.len()).collect(),
        transitions,
        fail,
        outputs,
    );
    debug_assert!(automaton.validate().is_ok());
    automaton
}

/// Union of two ascending, duplicate-free id lists.
fn union_sorted(a: &[PatternId], b: &[PatternId]) -> Vec<PatternId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
