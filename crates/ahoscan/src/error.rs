// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for automaton construction and scanning.

use thiserror::Error;

/// Errors produced while building, loading, or querying a scanner.
#[derive(Debug, Error)]
pub enum Error {
    /// The builder was finished without a pattern list, packed buffer, or config.
    #[error("no pattern source given: supply a pattern list, a packed buffer, or a config")]
    MissingPatterns,

    /// The pattern set needs more automaton states than allowed.
    #[error("pattern set needs more than {limit} automaton states")]
    TooManyStates { limit: usize },

    /// A pattern holds the NUL delimiter and cannot be packed.
    #[error("pattern {index} contains a NUL byte and cannot be packed")]
    PatternContainsNul { index: usize },

    /// A query input was neither text nor a byte sequence.
    #[error("argument must be text or bytes: {0}")]
    Argument(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// An automaton could not be serialized.
    #[error("failed to encode automaton: {0}")]
    Encode(String),

    /// A serialized automaton could not be decoded.
    #[error("failed to decode automaton: {0}")]
    Decode(String),

    /// A decoded automaton breaks a table invariant.
    #[error("corrupt automaton: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
