//! Query dispatcher configuration

use serde::{Deserialize, Serialize};

/// Shape of the situational summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Critical machines named individually before the remainder count
    pub max_critical_listed: usize,
    /// Intervention descriptions longer than this are cut with an ellipsis
    pub reason_max_chars: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_critical_listed: 5,
            reason_max_chars: 50,
        }
    }
}
