use super::stats::StatKey;
use super::team::Team;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One side of the final report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamBox {
    pub name: String,
    pub score: u32,
    pub drives: u32,
    pub stats: BTreeMap<StatKey, f64>,
}

impl TeamBox {
    pub fn from_team(team: &Team, score: u32, drives: u32) -> Self {
        let totals = team.stat_totals();
        let stats = StatKey::BOX_SCORE.iter().map(|k| (*k, totals.get(*k))).collect();
        Self { name: team.name.clone(), score, drives, stats }
    }

    pub fn stat(&self, key: StatKey) -> f64 {
        self.stats.get(&key).copied().unwrap_or(0.0)
    }
}

/// Terminal report of a completed game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxScore {
    pub home: TeamBox,
    pub away: TeamBox,
}

impl BoxScore {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn winner(&self) -> Option<&str> {
        match self.home.score.cmp(&self.away.score) {
            std::cmp::Ordering::Greater => Some(&self.home.name),
            std::cmp::Ordering::Less => Some(&self.away.name),
            std::cmp::Ordering::Equal => None,
        }
    }
}
