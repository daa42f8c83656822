use super::roster::PlayerRecord;
use super::stats::PlayerStats;
use crate::config::FatigueConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value used when a skill is read for a player that does not carry it.
///
/// Absent skills stay `None` on the player. Resolvers that must weigh such a
/// player anyway (fallback pools) read this league-average value instead of 0.
pub const NEUTRAL_SKILL: u8 = 50;

/// Player data for the game simulation.
///
/// `base` is fixed at roster load. `effective` is the fatigue-adjusted copy
/// the resolvers read, recomputed by [`Player::apply_fatigue_penalty`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: Position,
    base: Attributes,
    effective: Attributes,
    /// Accumulated exertion, 0..=100
    pub fatigue: f32,
    pub in_game: bool,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    K,
    P,
    DL,
    LOLB,
    MLB,
    ROLB,
    CB,
    S,
}

impl Position {
    pub const OFFENSIVE_SKILL: [Position; 3] = [Position::RB, Position::WR, Position::TE];

    pub fn side(self) -> Side {
        match self {
            Position::QB
            | Position::RB
            | Position::WR
            | Position::TE
            | Position::OL
            | Position::K
            | Position::P => Side::Offense,
            Position::DL
            | Position::LOLB
            | Position::MLB
            | Position::ROLB
            | Position::CB
            | Position::S => Side::Defense,
        }
    }

    pub fn is_linebacker(self) -> bool {
        matches!(self, Position::LOLB | Position::MLB | Position::ROLB)
    }

    /// DL plus linebackers
    pub fn is_front_seven(self) -> bool {
        self == Position::DL || self.is_linebacker()
    }

    pub fn is_secondary(self) -> bool {
        matches!(self, Position::CB | Position::S)
    }

    /// Positions that run on every snap and tire at the skill rate.
    pub fn is_high_exertion(self) -> bool {
        matches!(
            self,
            Position::RB
                | Position::WR
                | Position::TE
                | Position::CB
                | Position::S
                | Position::LOLB
                | Position::MLB
                | Position::ROLB
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::OL => "OL",
            Position::K => "K",
            Position::P => "P",
            Position::DL => "DL",
            Position::LOLB => "LOLB",
            Position::MLB => "MLB",
            Position::ROLB => "ROLB",
            Position::CB => "CB",
            Position::S => "S",
        };
        f.write_str(code)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Offense,
    Defense,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Offense => f.write_str("offense"),
            Side::Defense => f.write_str("defense"),
        }
    }
}

/// Numeric ratings, 0-100. Skill ratings are `None` when they do not apply to
/// the player's position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Attributes {
    pub speed: u8,
    pub strength: u8,
    pub intelligence: u8,
    pub endurance: u8,

    pub passing: Option<u8>,
    pub decision_making: Option<u8>,
    pub elusiveness: Option<u8>,
    pub vision: Option<u8>,
    pub hands: Option<u8>,
    pub route_running: Option<u8>,
    pub run_blocking: Option<u8>,
    pub pass_blocking: Option<u8>,
    pub rushing: Option<u8>,
    pub tackling: Option<u8>,
    pub coverage: Option<u8>,
    pub kick_power: Option<u8>,
    pub kick_accuracy: Option<u8>,
    pub punt_power: Option<u8>,
    pub punt_accuracy: Option<u8>,
}

/// Read a rating as f64, absent skills as [`NEUTRAL_SKILL`].
pub fn rating(value: Option<u8>) -> f64 {
    f64::from(value.unwrap_or(NEUTRAL_SKILL))
}

fn penalize(base: u8, scale: f32, floor_ratio: f32) -> u8 {
    let base = f32::from(base);
    let floor = (base * floor_ratio).round();
    let value = (base * (1.0 - scale)).round();
    value.max(floor).clamp(0.0, 100.0) as u8
}

fn penalize_opt(base: Option<u8>, scale: f32, floor_ratio: f32) -> Option<u8> {
    base.map(|b| penalize(b, scale, floor_ratio))
}

impl Attributes {
    /// Fatigue-adjusted copy. Intelligence, endurance, passing, decision
    /// making and the kicking ratings are not affected by fatigue.
    pub fn fatigued(&self, fatigue: f32, config: &FatigueConfig) -> Attributes {
        let scale = (fatigue.clamp(0.0, 100.0) / 100.0) * config.max_attribute_penalty;
        let floor = config.attribute_floor_ratio;
        Attributes {
            speed: penalize(self.speed, scale, floor),
            strength: penalize(self.strength, scale, floor),
            elusiveness: penalize_opt(self.elusiveness, scale, floor),
            vision: penalize_opt(self.vision, scale, floor),
            hands: penalize_opt(self.hands, scale, floor),
            route_running: penalize_opt(self.route_running, scale, floor),
            run_blocking: penalize_opt(self.run_blocking, scale, floor),
            pass_blocking: penalize_opt(self.pass_blocking, scale, floor),
            rushing: penalize_opt(self.rushing, scale, floor),
            tackling: penalize_opt(self.tackling, scale, floor),
            coverage: penalize_opt(self.coverage, scale, floor),
            ..*self
        }
    }
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            position,
            base: attributes,
            effective: attributes,
            fatigue: 0.0,
            in_game: false,
            stats: PlayerStats::default(),
        }
    }

    pub fn from_record(record: PlayerRecord) -> Self {
        let attributes = Attributes {
            speed: record.speed,
            strength: record.strength,
            intelligence: record.intelligence,
            endurance: record.endurance,
            passing: record.passing,
            decision_making: record.decision_making,
            elusiveness: record.elusiveness,
            vision: record.vision,
            hands: record.hands,
            route_running: record.route_running,
            run_blocking: record.run_blocking,
            pass_blocking: record.pass_blocking,
            rushing: record.rushing,
            tackling: record.tackling,
            coverage: record.coverage,
            kick_power: record.kick_power,
            kick_accuracy: record.kick_accuracy,
            punt_power: record.punt_power,
            punt_accuracy: record.punt_accuracy,
        };
        let mut player = Player::new(record.name, record.position, attributes);
        player.fatigue = record.fatigue.clamp(0.0, 100.0);
        player.in_game = record.in_game;
        player.stats = record.stats;
        player
    }

    pub fn with_in_game(mut self, in_game: bool) -> Self {
        self.in_game = in_game;
        self
    }

    /// Ratings as loaded from the roster
    pub fn base(&self) -> &Attributes {
        &self.base
    }

    /// Ratings the resolvers use this snap
    pub fn attrs(&self) -> &Attributes {
        &self.effective
    }

    /// Recompute effective ratings from base and current fatigue.
    pub fn apply_fatigue_penalty(&mut self, config: &FatigueConfig) {
        self.effective = self.base.fatigued(self.fatigue, config);
    }

    pub fn add_fatigue(&mut self, amount: f32) {
        self.fatigue = (self.fatigue + amount).clamp(0.0, 100.0);
    }

    pub fn speed(&self) -> f64 {
        f64::from(self.effective.speed)
    }

    pub fn strength(&self) -> f64 {
        f64::from(self.effective.strength)
    }

    pub fn intelligence(&self) -> f64 {
        f64::from(self.effective.intelligence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receiver() -> Player {
        Player::new(
            "Test Receiver",
            Position::WR,
            Attributes {
                speed: 80,
                strength: 60,
                intelligence: 70,
                endurance: 80,
                hands: Some(85),
                route_running: Some(75),
                ..Attributes::default()
            },
        )
    }

    #[test]
    fn test_fatigue_penalty_scales_with_fatigue() {
        let cfg = FatigueConfig::default();
        let mut p = receiver();

        p.fatigue = 0.0;
        p.apply_fatigue_penalty(&cfg);
        assert_eq!(p.attrs().speed, 80);

        p.fatigue = 100.0;
        p.apply_fatigue_penalty(&cfg);
        // 80 * 0.85 = 68
        assert_eq!(p.attrs().speed, 68);
        assert_eq!(p.attrs().hands, Some(72));
        assert_eq!(p.base().speed, 80, "base ratings never change");
    }

    #[test]
    fn test_fatigue_penalty_respects_floor() {
        let mut cfg = FatigueConfig::default();
        cfg.max_attribute_penalty = 0.9;
        let mut p = receiver();
        p.fatigue = 100.0;
        p.apply_fatigue_penalty(&cfg);
        // floor = round(80 * 2/3) = 53
        assert_eq!(p.attrs().speed, 53);
    }

    #[test]
    fn test_unaffected_ratings_and_absent_skills() {
        let cfg = FatigueConfig::default();
        let mut p = receiver();
        p.fatigue = 80.0;
        p.apply_fatigue_penalty(&cfg);
        assert_eq!(p.attrs().intelligence, 70);
        assert_eq!(p.attrs().endurance, 80);
        assert_eq!(p.attrs().kick_power, None, "absent skill stays absent");
        assert_eq!(rating(p.attrs().kick_power), 50.0);
    }

    #[test]
    fn test_add_fatigue_clamps() {
        let mut p = receiver();
        p.add_fatigue(150.0);
        assert_eq!(p.fatigue, 100.0);
        p.add_fatigue(-300.0);
        assert_eq!(p.fatigue, 0.0);
    }

    #[test]
    fn test_position_groups() {
        assert_eq!(Position::K.side(), Side::Offense);
        assert_eq!(Position::LOLB.side(), Side::Defense);
        assert!(Position::MLB.is_front_seven());
        assert!(!Position::CB.is_front_seven());
        assert!(Position::S.is_secondary());
        assert!(Position::LOLB.is_high_exertion());
        assert!(!Position::OL.is_high_exertion());
    }
}
