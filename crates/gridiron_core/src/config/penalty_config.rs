//! Penalty rates

use serde::{Deserialize, Serialize};

/// Per-snap flag rates. A flag replaces the play entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Offensive flag probability per snap (default: 0.08)
    pub offensive_rate: f64,
    /// Defensive flag probability per snap (default: 0.05)
    pub defensive_rate: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { offensive_rate: 0.08, defensive_rate: 0.05 }
    }
}
