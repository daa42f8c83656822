use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed statistic vocabulary. Half sacks make the values fractional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    PassAttempts,
    Completions,
    PassYards,
    InterceptionsThrown,
    SacksTaken,
    Carries,
    RushYards,
    Fumbles,
    Receptions,
    ReceivingYards,
    Targets,
    Touchdowns,
    Tackles,
    Sacks,
    Interceptions,
    ForcedFumbles,
    #[serde(rename = "pat_made")]
    PatMade,
    #[serde(rename = "pat_attempts")]
    PatAttempts,
    #[serde(rename = "fg_made")]
    FieldGoalsMade,
    #[serde(rename = "fg_attempted")]
    FieldGoalsAttempted,
    Punts,
    PuntYards,
}

impl StatKey {
    /// Rows of the team box score, in display order.
    pub const BOX_SCORE: [StatKey; 21] = [
        StatKey::PassAttempts,
        StatKey::Completions,
        StatKey::PassYards,
        StatKey::InterceptionsThrown,
        StatKey::SacksTaken,
        StatKey::Carries,
        StatKey::RushYards,
        StatKey::Fumbles,
        StatKey::Receptions,
        StatKey::ReceivingYards,
        StatKey::Targets,
        StatKey::Touchdowns,
        StatKey::Tackles,
        StatKey::Sacks,
        StatKey::Interceptions,
        StatKey::PatMade,
        StatKey::PatAttempts,
        StatKey::FieldGoalsMade,
        StatKey::FieldGoalsAttempted,
        StatKey::Punts,
        StatKey::PuntYards,
    ];
}

/// Per-player counters keyed by [`StatKey`]. Missing keys read as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct PlayerStats(BTreeMap<StatKey, f64>);

impl PlayerStats {
    pub fn get(&self, key: StatKey) -> f64 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, key: StatKey, amount: f64) {
        *self.0.entry(key).or_insert(0.0) += amount;
    }

    pub fn incr(&mut self, key: StatKey) {
        self.add(key, 1.0);
    }

    /// Sum of every counter. Used as a rough production measure when
    /// picking between equally rested substitutes.
    pub fn production(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn merge(&mut self, other: &PlayerStats) {
        for (key, value) in &other.0 {
            self.add(*key, *value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| *v == 0.0)
    }
}
