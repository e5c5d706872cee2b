//! Context search configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debounce and activation threshold for the autocomplete search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a lookup is issued
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters) never hit the backing store
    pub min_query_length: usize,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_length: 2,
        }
    }
}
