//! Fatigue & substitution parameters

use serde::{Deserialize, Serialize};

/// Exertion, attribute-penalty and substitution knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    // === Substitution ===
    /// In-game players above this fatigue get benched (default: 50)
    pub substitution_threshold: f32,

    // === Attribute penalty ===
    /// Attribute drop at fatigue 100 (default: 0.15)
    pub max_attribute_penalty: f32,
    /// Effective attribute never drops below base * ratio (default: 2/3)
    pub attribute_floor_ratio: f32,

    // === Per-snap exertion ===
    /// RB/WR/TE and back-seven defenders (default: 1.8)
    pub skill_exertion: f32,
    /// Linemen, quarterback and specialists (default: 0.1)
    pub line_exertion: f32,

    // === Play-specific exertion ===
    /// Yards per extra unit of effort for the ball carrier (default: 7.0)
    pub run_yards_per_effort: f32,
    /// Yards per extra unit of effort for the receiver (default: 10.0)
    pub catch_yards_per_effort: f32,
    /// Non-carrier skill players on run plays get this share (default: 0.75)
    pub run_decoy_share: f32,

    // === Recovery ===
    /// Bench recovery per snap is endurance / divisor (default: 10)
    pub bench_recovery_divisor: f32,

    /// Master switch, off only for controlled experiments
    pub enabled: bool,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            substitution_threshold: 50.0,

            max_attribute_penalty: 0.15,
            attribute_floor_ratio: 2.0 / 3.0,

            skill_exertion: 1.8,
            line_exertion: 0.1,

            run_yards_per_effort: 7.0,
            catch_yards_per_effort: 10.0,
            run_decoy_share: 0.75,

            bench_recovery_divisor: 10.0,

            enabled: true,
        }
    }
}
