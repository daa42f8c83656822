//! # Simulation Configuration
//!
//! All tuning constants that are not part of a probability table live here,
//! grouped per concern. Tables that define the shape of the model (run/pass
//! tendencies, field-goal buckets) stay next to the code that reads them.
//!
//! ## Usage
//! ```rust
//! use gridiron_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let clean = SimConfig::without_penalties();
//! assert_eq!(clean.penalties.offensive_rate, 0.0);
//! # let _ = config;
//! ```

mod fatigue_config;
mod penalty_config;
mod tempo_config;

pub use fatigue_config::FatigueConfig;
pub use penalty_config::PenaltyConfig;
pub use tempo_config::TempoConfig;

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Whole-game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Coin-toss winner elects to receive with this probability (default: 0.8)
    pub receive_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { receive_probability: 0.8 }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub fatigue: FatigueConfig,
    #[serde(default)]
    pub tempo: TempoConfig,
    #[serde(default)]
    pub penalties: PenaltyConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl SimConfig {
    /// Default tuning
    pub fn realistic() -> Self {
        Self::default()
    }

    /// No flags. Keeps play-by-play tests focused on the resolvers.
    pub fn without_penalties() -> Self {
        let mut cfg = Self::default();
        cfg.penalties.offensive_rate = 0.0;
        cfg.penalties.defensive_rate = 0.0;
        cfg
    }

    /// Fatigue disabled, nobody ever gets substituted.
    pub fn no_fatigue() -> Self {
        let mut cfg = Self::default();
        cfg.fatigue.enabled = false;
        cfg
    }

    /// Parse a JSON override. Missing sections fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("penalties.offensive_rate", self.penalties.offensive_rate),
            ("penalties.defensive_rate", self.penalties.defensive_rate),
            ("game.receive_probability", self.game.receive_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidConfig(format!("{name} must be in [0, 1], got {p}")));
            }
        }

        if !(0.0..=100.0).contains(&self.fatigue.substitution_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "fatigue.substitution_threshold must be in [0, 100], got {}",
                self.fatigue.substitution_threshold
            )));
        }
        if self.fatigue.bench_recovery_divisor <= 0.0 {
            return Err(SimError::InvalidConfig(
                "fatigue.bench_recovery_divisor must be positive".to_string(),
            ));
        }

        let ranges = [
            ("tempo.normal_play_secs", self.tempo.normal_play_secs),
            ("tempo.hurry_play_secs", self.tempo.hurry_play_secs),
            ("tempo.kickoff_secs", self.tempo.kickoff_secs),
            ("tempo.field_goal_secs", self.tempo.field_goal_secs),
            ("tempo.punt_secs", self.tempo.punt_secs),
        ];
        for (name, (lo, hi)) in ranges {
            if lo < 0 || lo > hi {
                return Err(SimError::InvalidConfig(format!("{name} is not a valid range: {lo}..={hi}")));
            }
        }
        if self.tempo.half_seconds <= 0 {
            return Err(SimError::InvalidConfig("tempo.half_seconds must be positive".to_string()));
        }

        Ok(())
    }
}
