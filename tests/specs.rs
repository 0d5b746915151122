//! Behavioral specifications for the ahoscan public API.
//!
//! These tests only use what the crate exports: build a scanner, query it,
//! and check the reported patterns.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;

/// > Patterns are reported sorted by their index in the list.
#[test]
fn reports_matches_in_pattern_order() {
    let scanner = scanner(PRONOUNS);
    assert_eq!(
        hits(&scanner, "bruce said hers was awesome"),
        Some(vec!["he", "her", "hers"])
    );
}

/// > Input is folded to ASCII lowercase before matching.
#[test]
fn matches_upper_case_input() {
    let scanner = scanner(PRONOUNS);
    assert!(hits(&scanner, "BRUCE SAID HERS WAS AWESOME").is_some());
}

/// > No occurrence yields the empty sentinel.
#[test]
fn no_match_is_none() {
    let scanner = scanner(PRONOUNS);
    assert_eq!(hits(&scanner, "zzz"), None);
}

/// > An empty pattern set is valid and never matches.
#[test]
fn empty_pattern_set_never_matches() {
    let scanner = scanner(&[]);
    assert_eq!(hits(&scanner, "bruce said hers was awesome"), None);
    assert_eq!(hits(&scanner, ""), None);
}

/// > Building without a pattern source is a construction error.
#[test]
fn construction_without_patterns_fails() {
    let err = Scanner::builder().build().unwrap_err();
    assert!(matches!(err, Error::MissingPatterns));
}

/// > A clone is a distinct handle with identical answers.
#[test]
fn clones_are_independent_handles() {
    let s1 = scanner(PRONOUNS);
    let s2 = s1.clone();
    assert_ne!(s1, s2);
    assert!(s1.shares_automaton(&s2));
    for input in ["bruce said hers was awesome", "HIM", "zzz", ""] {
        assert_eq!(hits(&s1, input), hits(&s2, input));
    }
}

/// > Non-text, non-byte input is an argument error.
#[test]
fn rejects_unsupported_input() {
    let scanner = scanner(PRONOUNS);
    let err = scanner.is_suspicious_value(&serde_json::json!(17)).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

/// > The packed form carries the same list; its terminator is not a pattern.
#[test]
fn packed_and_list_construction_agree() {
    let packed = PackedPatterns::encode(PRONOUNS).unwrap();
    assert!(packed.as_bytes().ends_with(b"hers\0"));
    let from_packed = Scanner::builder().packed(packed.as_bytes()).build().unwrap();
    let from_list = scanner(PRONOUNS);
    assert_eq!(from_packed.patterns().len(), from_list.patterns().len());
    for input in ["bruce said hers was awesome", "his", "zzz"] {
        assert_eq!(hits(&from_packed, input), hits(&from_list, input));
    }
}

/// > A persisted automaton answers like the one it was saved from.
#[test]
fn persisted_automaton_round_trips() {
    let original = scanner(PRONOUNS);
    let bytes = original.automaton().to_bytes().unwrap();
    let loaded = Automaton::from_bytes(&bytes).unwrap();
    let restored = Scanner::with_automaton(std::sync::Arc::new(loaded), PRONOUNS).unwrap();
    assert_eq!(
        hits(&restored, "bruce said hers was awesome"),
        hits(&original, "bruce said hers was awesome")
    );
}

/// > Configuration selects the fold policy and the pattern list.
#[test]
fn config_drives_construction() {
    let config = Config::parse(
        r#"
[matching]
case_fold = "none"

[patterns]
list = ["he", "her"]
"#,
    )
    .unwrap();
    let scanner = Scanner::builder().config(&config).build().unwrap();
    assert_eq!(hits(&scanner, "HER"), None);
    assert_eq!(hits(&scanner, "her"), Some(vec!["he", "her"]));
}
