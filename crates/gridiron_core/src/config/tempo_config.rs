//! Game clock parameters

use serde::{Deserialize, Serialize};

/// Seconds consumed by each kind of snap, all ranges inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoConfig {
    /// Length of a half in seconds (default: 2400)
    pub half_seconds: i32,
    /// Offense hurries at or below this many seconds (default: 120)
    pub hurry_threshold: i32,
    pub normal_play_secs: (i32, i32),
    pub hurry_play_secs: (i32, i32),
    pub kickoff_secs: (i32, i32),
    pub field_goal_secs: (i32, i32),
    pub punt_secs: (i32, i32),
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            half_seconds: 2400,
            hurry_threshold: 120,
            normal_play_secs: (25, 40),
            hurry_play_secs: (10, 25),
            kickoff_secs: (4, 12),
            field_goal_secs: (5, 7),
            punt_secs: (6, 10),
        }
    }
}

impl TempoConfig {
    pub fn is_hurrying(&self, seconds_remaining: i32) -> bool {
        seconds_remaining <= self.hurry_threshold
    }

    pub fn play_secs(&self, seconds_remaining: i32) -> (i32, i32) {
        if self.is_hurrying(seconds_remaining) {
            self.hurry_play_secs
        } else {
            self.normal_play_secs
        }
    }
}
