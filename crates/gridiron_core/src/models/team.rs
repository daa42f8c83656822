use super::player::{Player, Position, Side};
use super::roster::TeamRecord;
use super::stats::PlayerStats;
use crate::config::FatigueConfig;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// A team owns two disjoint rosters. Each player is either in the game or on
/// the bench for their side; substitution flips the flag, never the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub offense: Vec<Player>,
    pub defense: Vec<Player>,
}

impl Team {
    pub fn from_record(record: TeamRecord) -> Self {
        Self {
            name: record.team_name,
            offense: record.offense.into_iter().map(Player::from_record).collect(),
            defense: record.defense.into_iter().map(Player::from_record).collect(),
        }
    }

    pub fn roster(&self, side: Side) -> &[Player] {
        match side {
            Side::Offense => &self.offense,
            Side::Defense => &self.defense,
        }
    }

    /// Players currently on the field for `side`
    pub fn on_field(&self, side: Side) -> impl Iterator<Item = &Player> {
        self.roster(side).iter().filter(|p| p.in_game)
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.offense.iter().chain(self.defense.iter())
    }

    pub fn all_players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.offense.iter_mut().chain(self.defense.iter_mut())
    }

    /// First player at `position` anywhere on the offensive roster.
    pub fn specialist_index(&self, position: Position) -> Option<usize> {
        self.offense.iter().position(|p| p.position == position)
    }

    pub fn kicker(&self) -> Option<&Player> {
        self.specialist_index(Position::K).map(|i| &self.offense[i])
    }

    pub fn punter(&self) -> Option<&Player> {
        self.specialist_index(Position::P).map(|i| &self.offense[i])
    }

    pub fn kicker_mut(&mut self) -> Option<&mut Player> {
        self.specialist_index(Position::K).map(move |i| &mut self.offense[i])
    }

    pub fn punter_mut(&mut self) -> Option<&mut Player> {
        self.specialist_index(Position::P).map(move |i| &mut self.offense[i])
    }

    /// Starting quarterback
    pub fn quarterback_index(&self) -> Option<usize> {
        self.offense.iter().position(|p| p.in_game && p.position == Position::QB)
    }

    /// Mandatory personnel check, run once before kickoff.
    pub fn validate(&self) -> Result<()> {
        if self.quarterback_index().is_none() {
            return Err(SimError::IncompleteRoster {
                team: self.name.clone(),
                position: Position::QB,
            });
        }
        for position in [Position::K, Position::P] {
            if self.specialist_index(position).is_none() {
                return Err(SimError::IncompleteRoster { team: self.name.clone(), position });
            }
        }
        if self.on_field(Side::Defense).next().is_none() {
            return Err(SimError::NoStarters { team: self.name.clone(), side: Side::Defense });
        }
        Ok(())
    }

    /// Bench players recover `endurance / divisor` fatigue per snap.
    pub fn recover_bench_players(&mut self, config: &FatigueConfig) {
        for player in self.all_players_mut().filter(|p| !p.in_game) {
            let recovery = f32::from(player.base().endurance) / config.bench_recovery_divisor;
            player.fatigue = (player.fatigue - recovery).max(0.0);
        }
    }

    pub fn apply_fatigue_penalties(&mut self, config: &FatigueConfig) {
        for player in self.all_players_mut() {
            player.apply_fatigue_penalty(config);
        }
    }

    /// Team totals over every player on both rosters.
    pub fn stat_totals(&self) -> PlayerStats {
        let mut totals = PlayerStats::default();
        for player in self.all_players() {
            totals.merge(&player.stats);
        }
        totals
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.all_players().find(|p| p.name == name)
    }
}
