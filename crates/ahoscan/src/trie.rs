// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prefix trie over folded pattern bytes.
//!
//! Nodes live in a single arena and are referenced by [`StateId`]. Ids are
//! handed out in the order edges are first created: pattern insertion order,
//! then byte order within a pattern. The root is always state 0. The trie only
//! exists during construction; [`crate::compile`] turns it into the
//! automaton's dense tables.

use crate::error::{Error, Result};
use crate::pattern::{PatternId, PatternSet};

/// Index of an automaton state. The root is `0`.
pub type StateId = u32;

pub const ROOT: StateId = 0;

/// Largest state count a [`StateId`] can address.
pub const MAX_STATES: usize = StateId::MAX as usize;

#[derive(Debug, Default)]
pub(crate) struct TrieNode {
    /// Outgoing edges, sorted by byte.
    children: Vec<(u8, StateId)>,
    /// Patterns ending exactly at this node.
    output: Vec<PatternId>,
}

#[derive(Debug)]
pub(crate) struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn children(&self, state: StateId) -> &[(u8, StateId)] {
        &self.nodes[state as usize].children
    }

    #[cfg(test)]
    pub(crate) fn child(&self, state: StateId, byte: u8) -> Option<StateId> {
        let children = self.children(state);
        children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|pos| children[pos].1)
    }

    pub(crate) fn output(&self, state: StateId) -> &[PatternId] {
        &self.nodes[state as usize].output
    }
}

pub(crate) struct TrieBuilder {
    nodes: Vec<TrieNode>,
    max_states: usize,
}

impl TrieBuilder {
    pub(crate) fn new(max_states: usize) -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(TrieNode::default());
        Self {
            nodes,
            max_states: max_states.min(MAX_STATES),
        }
    }

    fn alloc(&mut self) -> Result<StateId> {
        let id = self.nodes.len();
        if id >= self.max_states {
            return Err(Error::TooManyStates {
                limit: self.max_states,
            });
        }
        self.nodes.push(TrieNode::default());
        Ok(id as StateId)
    }

    fn get_or_create_child(&mut self, parent: StateId, byte: u8) -> Result<StateId> {
        let children = &self.nodes[parent as usize].children;
        match children.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(pos) => Ok(children[pos].1),
            Err(pos) => {
                let child = self.alloc()?;
                self.nodes[parent as usize].children.insert(pos, (byte, child));
                Ok(child)
            }
        }
    }

    /// Walk `bytes` from the root, creating missing nodes, and mark `id` as
    /// ending at the node reached.
    pub(crate) fn insert<I>(&mut self, id: PatternId, bytes: I) -> Result<StateId>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut state = ROOT;
        for byte in bytes {
            state = self.get_or_create_child(state, byte)?;
        }
        let output = &mut self.nodes[state as usize].output;
        if output.last() != Some(&id) {
            output.push(id);
        }
        Ok(state)
    }

    pub(crate) fn finish(self) -> Trie {
        Trie { nodes: self.nodes }
    }
}

/// Insert every pattern of `patterns`, folded with the set's policy.
pub(crate) fn build(patterns: &PatternSet, max_states: usize) -> Result<Trie> {
    let fold = patterns.fold();
    let mut builder = TrieBuilder::new(max_states);
    for pattern in patterns {
        builder.insert(
            pattern.id(),
            pattern.as_bytes().iter().map(|&b| fold.fold(b)),
        )?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
#[path = "trie_tests.rs"]
mod tests;
