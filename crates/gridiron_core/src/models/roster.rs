//! Roster input schema
//!
//! The records mirror the roster JSON layout (`{"teams": [{"team_name", "offense",
//! "defense"}]}`). General ratings default to 50, fatigue to 0 and `in_game` to
//! false. Position skills default to absent.

use super::player::Position;
use super::stats::PlayerStats;
use crate::error::Result;
use serde::{Deserialize, Serialize};

fn default_rating() -> u8 {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub position: Position,
    #[serde(default = "default_rating")]
    pub speed: u8,
    #[serde(default = "default_rating")]
    pub strength: u8,
    #[serde(default = "default_rating")]
    pub intelligence: u8,
    #[serde(default = "default_rating")]
    pub endurance: u8,
    #[serde(default)]
    pub fatigue: f32,
    #[serde(default)]
    pub in_game: bool,
    #[serde(default)]
    pub stats: PlayerStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_making: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elusiveness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hands: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_running: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_blocking: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_blocking: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tackling: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kick_power: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kick_accuracy: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punt_power: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punt_accuracy: Option<u8>,
}

impl PlayerRecord {
    /// Record with average general ratings and no skills.
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            speed: 50,
            strength: 50,
            intelligence: 50,
            endurance: 50,
            fatigue: 0.0,
            in_game: false,
            stats: PlayerStats::default(),
            passing: None,
            decision_making: None,
            elusiveness: None,
            vision: None,
            hands: None,
            route_running: None,
            run_blocking: None,
            pass_blocking: None,
            rushing: None,
            tackling: None,
            coverage: None,
            kick_power: None,
            kick_accuracy: None,
            punt_power: None,
            punt_accuracy: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRecord {
    pub team_name: String,
    pub offense: Vec<PlayerRecord>,
    pub defense: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LeagueRecord {
    pub teams: Vec<TeamRecord>,
}

impl LeagueRecord {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Anything that can hand the engine team records. The first two teams
/// returned play the game, home first.
pub trait RosterSource {
    fn team_records(&self) -> Result<Vec<TeamRecord>>;
}

impl RosterSource for LeagueRecord {
    fn team_records(&self) -> Result<Vec<TeamRecord>> {
        Ok(self.teams.clone())
    }
}

impl RosterSource for [TeamRecord] {
    fn team_records(&self) -> Result<Vec<TeamRecord>> {
        Ok(self.to_vec())
    }
}
