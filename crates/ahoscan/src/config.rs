// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner configuration loaded from TOML.
//!
//! ```toml
//! version = 1
//!
//! [matching]
//! case_fold = "ascii"   # or "none"
//! max_states = 65535
//!
//! [patterns]
//! list = ["he", "she", "his", "hers"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::pattern::CaseFold;
use crate::trie::MAX_STATES;

/// Config format version understood by this crate.
pub const CONFIG_VERSION: u32 = 1;

const KNOWN_KEYS: &[&str] = &["version", "matching", "patterns"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub matching: MatchingConfig,
    pub patterns: PatternsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            matching: MatchingConfig::default(),
            patterns: PatternsConfig::default(),
        }
    }
}

/// How patterns and input are compared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Byte normalization: "ascii" (default) or "none".
    pub case_fold: CaseFold,

    /// Upper bound on automaton states, root included.
    pub max_states: Option<usize>,
}

impl MatchingConfig {
    pub fn max_states(&self) -> usize {
        self.max_states.unwrap_or(MAX_STATES)
    }
}

/// Inline pattern source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    pub list: Option<Vec<String>>,
}

impl Config {
    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!("unrecognized config key: {}", key);
            }
        }

        let config: Config = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| Error::Config(e.to_string()))?;

        if config.version != CONFIG_VERSION {
            return Err(Error::Config(format!(
                "unsupported config version {} (expected {})",
                config.version, CONFIG_VERSION
            )));
        }
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
