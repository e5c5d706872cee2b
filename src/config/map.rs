//! Map viewport configuration

use serde::{Deserialize, Serialize};

/// Initial viewport and the zoom used when locating a single machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lng]` of the initial view (centre of Senegal)
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    pub locate_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: [14.4974, -14.4524],
            default_zoom: 7.0,
            locate_zoom: 12.0,
        }
    }
}
