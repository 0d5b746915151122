// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for failure-link construction and goto completion.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use similar_asserts::assert_eq;

use super::*;
use crate::pattern::CaseFold;

fn automaton_of(patterns: &[&str]) -> Automaton {
    Automaton::new(&PatternSet::new(patterns, CaseFold::Ascii)).unwrap()
}

// =============================================================================
// FAILURE LINKS
// =============================================================================

#[test]
fn classic_failure_links() {
    // 1=h 2=he 3=s 4=sh 5=she 6=hi 7=his 8=her 9=hers
    let ac = automaton_of(&["he", "she", "his", "hers"]);
    let fails: Vec<StateId> = (0..ac.state_count() as StateId).map(|s| ac.fail(s)).collect();
    assert_eq!(fails, vec![0, 0, 0, 0, 1, 2, 0, 3, 0, 3]);
}

#[test]
fn outputs_inherit_through_failure_links() {
    let ac = automaton_of(&["he", "she", "his", "hers"]);
    assert_eq!(ac.output(2), &[0]);
    assert_eq!(ac.output(5), &[0, 1]);
    assert_eq!(ac.output(7), &[2]);
    assert_eq!(ac.output(9), &[3]);
    assert!(ac.output(8).is_empty());
}

#[test]
fn depth_one_states_fail_to_root() {
    let ac = automaton_of(&["abc", "xyz"]);
    assert_eq!(ac.fail(ac.next_state(ROOT, b'a')), ROOT);
    assert_eq!(ac.fail(ac.next_state(ROOT, b'x')), ROOT);
}

#[test]
fn chained_suffix_outputs_are_merged() {
    let ac = automaton_of(&["abcd", "bcd", "cd", "d"]);
    let mut state = ROOT;
    for &b in b"abcd" {
        state = ac.next_state(state, b);
    }
    assert_eq!(ac.output(state), &[0, 1, 2, 3]);
}

// =============================================================================
// GOTO COMPLETION
// =============================================================================

#[test]
fn empty_set_self_loops_on_root() {
    let ac = automaton_of(&[]);
    assert_eq!(ac.state_count(), 1);
    assert!(ac.output(ROOT).is_empty());
    for byte in 0..=u8::MAX {
        assert_eq!(ac.next_state(ROOT, byte), ROOT);
    }
}

#[test]
fn missing_edges_follow_the_failure_row() {
    let ac = automaton_of(&["he", "she", "his", "hers"]);
    // "sh" + 'i' has no trie edge; fail(sh) = h, and h --i--> hi
    assert_eq!(ac.next_state(4, b'i'), 6);
    // "her" + 'h' restarts at h
    assert_eq!(ac.next_state(8, b'h'), 1);
    // unrelated bytes return to the root
    assert_eq!(ac.next_state(9, b'z'), ROOT);
}

#[test]
fn trie_edges_are_kept() {
    let ac = automaton_of(&["he", "she", "his", "hers"]);
    assert_eq!(ac.next_state(ROOT, b'h'), 1);
    assert_eq!(ac.next_state(1, b'e'), 2);
    assert_eq!(ac.next_state(2, b'r'), 8);
    assert_eq!(ac.next_state(8, b's'), 9);
}

// =============================================================================
// union_sorted
// =============================================================================

#[test]
fn union_sorted_merges_and_dedups() {
    assert_eq!(union_sorted(&[0, 2, 4], &[1, 2, 5]), vec![0, 1, 2, 4, 5]);
    assert_eq!(union_sorted(&[], &[3]), vec![3]);
    assert_eq!(union_sorted(&[3], &[]), vec![3]);
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn pattern_lists() -> impl Strategy<Value = Vec<Vec<u8>>> {
    let byte = prop::sample::select(b"abcAB\x00\xff".to_vec());
    prop::collection::vec(prop::collection::vec(byte, 0..6), 0..8)
}

proptest! {
    #[test]
    fn every_state_has_a_transition_for_every_byte(patterns in pattern_lists()) {
        let ac = Automaton::new(&PatternSet::new(&patterns, CaseFold::Exact)).unwrap();
        for state in 0..ac.state_count() as StateId {
            for byte in 0..=u8::MAX {
                prop_assert!((ac.next_state(state, byte) as usize) < ac.state_count());
            }
        }
    }

    #[test]
    fn failure_target_output_is_a_subset(patterns in pattern_lists()) {
        let ac = Automaton::new(&PatternSet::new(&patterns, CaseFold::Ascii)).unwrap();
        for state in 0..ac.state_count() as StateId {
            let own = ac.output(state);
            for id in ac.output(ac.fail(state)) {
                prop_assert!(own.contains(id), "state {} lost pattern {}", state, id);
            }
        }
    }

    #[test]
    fn building_twice_gives_identical_tables(patterns in pattern_lists()) {
        let set = PatternSet::new(&patterns, CaseFold::Ascii);
        prop_assert_eq!(Automaton::new(&set).unwrap(), Automaton::new(&set).unwrap());
    }

    #[test]
    fn compiled_tables_validate(patterns in pattern_lists()) {
        let ac = Automaton::new(&PatternSet::new(&patterns, CaseFold::Ascii)).unwrap();
        prop_assert!(ac.validate().is_ok());
    }
}
