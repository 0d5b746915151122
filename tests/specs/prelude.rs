//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use ahoscan::{Automaton, Config, Error, PackedPatterns, Scanner};

pub const PRONOUNS: &[&str] = &["he", "him", "his", "she", "her", "hers"];

/// Build a scanner with default options.
pub fn scanner(patterns: &[&str]) -> Scanner {
    Scanner::new(patterns).unwrap()
}

/// Matched patterns as text, or `None` when nothing matched.
pub fn hits<'s>(scanner: &'s Scanner, input: &str) -> Option<Vec<&'s str>> {
    scanner
        .is_suspicious(input)
        .map(|found| found.into_iter().map(|p| p.as_str().unwrap()).collect())
}
