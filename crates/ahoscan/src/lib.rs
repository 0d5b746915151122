// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-pattern substring scanning over a total Aho-Corasick automaton.
//!
//! Construction runs one way:
//! patterns -> [`PatternSet`] -> trie -> failure-link compilation -> [`Automaton`].
//! A [`Scanner`] wraps the compiled automaton in an `Arc` and answers queries
//! in terms of the caller's original patterns.
//!
//! ```
//! use ahoscan::Scanner;
//!
//! let scanner = Scanner::new(["he", "him", "his", "she", "her", "hers"])?;
//! let hits = scanner.is_suspicious("BRUCE SAID HERS WAS AWESOME").unwrap_or_default();
//! let hits: Vec<String> = hits.iter().map(|p| p.to_string()).collect();
//! assert_eq!(hits, ["he", "her", "hers"]);
//! # Ok::<(), ahoscan::Error>(())
//! ```

pub mod automaton;
mod compile;
pub mod config;
pub mod error;
pub mod packed;
pub mod pattern;
pub mod scanner;
pub mod trie;

pub use automaton::{ALPHABET, Automaton, Match};
pub use config::Config;
pub use error::{Error, Result};
pub use packed::PackedPatterns;
pub use pattern::{CaseFold, Pattern, PatternId, PatternSet};
pub use scanner::{Input, Scanner, ScannerBuilder};
pub use trie::{ROOT, StateId};

#[cfg(test)]
mod test_utils;
