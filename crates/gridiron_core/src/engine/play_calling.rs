//! Play-Calling Policy
//!
//! Fixed probability tables, conditioned on down and distance. The offense
//! remembers exactly one previous play; the defense remembers nothing and
//! simply guesses.

use super::sampling::roll;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayCall {
    Run,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseCall {
    DefendRun,
    DefendPass,
}

impl DefenseCall {
    fn other(self) -> Self {
        match self {
            DefenseCall::DefendRun => DefenseCall::DefendPass,
            DefenseCall::DefendPass => DefenseCall::DefendRun,
        }
    }
}

/// The defense read the play: run met by run defense, pass by pass defense.
pub fn is_guessed(offense: PlayCall, defense: DefenseCall) -> bool {
    matches!(
        (offense, defense),
        (PlayCall::Run, DefenseCall::DefendRun) | (PlayCall::Pass, DefenseCall::DefendPass)
    )
}

// === Offense ===

/// (max distance, run probability) per down. The last bucket is open ended.
static RUN_TENDENCY: [[(f64, f64); 4]; 4] = [
    [(3.0, 0.75), (6.0, 0.65), (10.0, 0.55), (f64::INFINITY, 0.40)],
    [(3.0, 0.70), (6.0, 0.50), (10.0, 0.40), (f64::INFINITY, 0.25)],
    [(3.0, 0.60), (6.0, 0.35), (10.0, 0.20), (f64::INFINITY, 0.10)],
    [(1.0, 0.55), (3.0, 0.35), (6.0, 0.20), (f64::INFINITY, 0.05)],
];

const MOMENTUM_RUN_YARDS: f64 = 6.0;
const MOMENTUM_PASS_YARDS: f64 = 10.0;

/// What the offense remembers about its previous snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastPlay {
    pub call: PlayCall,
    pub yards: f64,
}

impl LastPlay {
    /// Shift applied to the base run probability.
    pub fn momentum(&self) -> f64 {
        match self.call {
            PlayCall::Run if self.yards >= MOMENTUM_RUN_YARDS => 0.1,
            PlayCall::Pass if self.yards >= MOMENTUM_PASS_YARDS => -0.05,
            _ => 0.0,
        }
    }
}

/// Base run probability before momentum.
pub fn run_probability(down: u8, distance: f64) -> f64 {
    let row = match down {
        1..=4 => &RUN_TENDENCY[usize::from(down - 1)],
        _ => unreachable!("play called on terminal down {down}"),
    };
    row.iter()
        .find(|(max_distance, _)| distance <= *max_distance)
        .map(|(_, p)| *p)
        .unwrap_or(row[3].1)
}

pub fn call_offense(
    rng: &mut impl Rng,
    down: u8,
    distance: f64,
    last: Option<&LastPlay>,
) -> PlayCall {
    let momentum = last.map_or(0.0, LastPlay::momentum);
    let p_run = (run_probability(down, distance) + momentum).clamp(0.1, 0.9);
    if roll(rng, p_run) {
        PlayCall::Run
    } else {
        PlayCall::Pass
    }
}

// === Defense ===

/// Favoured call and its probability.
pub fn defense_tendency(down: u8, distance: f64) -> (DefenseCall, f64) {
    use DefenseCall::{DefendPass, DefendRun};
    match down {
        1 => match distance {
            d if d <= 3.0 => (DefendRun, 0.75),
            d if d <= 6.0 => (DefendRun, 0.60),
            d if d <= 10.0 => (DefendPass, 0.55),
            _ => (DefendPass, 0.70),
        },
        2 => match distance {
            d if d <= 3.0 => (DefendRun, 0.65),
            d if d <= 6.0 => (DefendPass, 0.60),
            d if d <= 10.0 => (DefendPass, 0.70),
            _ => (DefendPass, 0.80),
        },
        3 => match distance {
            d if d <= 3.0 => (DefendRun, 0.60),
            d if d <= 6.0 => (DefendPass, 0.70),
            d if d <= 10.0 => (DefendPass, 0.85),
            _ => (DefendPass, 0.90),
        },
        4 => (DefendPass, 1.0),
        _ => unreachable!("defense called on terminal down {down}"),
    }
}

pub fn call_defense(rng: &mut impl Rng, down: u8, distance: f64) -> DefenseCall {
    let (favoured, p) = defense_tendency(down, distance);
    if roll(rng, p) {
        favoured
    } else {
        favoured.other()
    }
}

// === Fourth down ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FourthDownDecision {
    GoForIt,
    FieldGoal,
    Punt,
}

/// Which rule of the fourth-down policy applies. Checked in declaration
/// order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourthDownBranch {
    /// Own half, inches to go
    OwnHalfSneak,
    /// Short yardage between the 50 and the opponent 30
    MidfieldShort,
    /// Inside the opponent 15 with 5 or less to go
    GoalToGo,
    Kick,
}

impl FourthDownBranch {
    pub fn classify(yardline: f64, distance: f64) -> Self {
        if yardline < 50.0 {
            if distance <= 1.0 {
                FourthDownBranch::OwnHalfSneak
            } else {
                FourthDownBranch::Kick
            }
        } else if distance <= 2.0 && yardline < 70.0 {
            FourthDownBranch::MidfieldShort
        } else if yardline > 85.0 && distance <= 5.0 {
            FourthDownBranch::GoalToGo
        } else {
            FourthDownBranch::Kick
        }
    }

    pub fn go_probability(self) -> f64 {
        match self {
            FourthDownBranch::OwnHalfSneak => 0.3,
            FourthDownBranch::MidfieldShort => 0.5,
            FourthDownBranch::GoalToGo => 0.6,
            FourthDownBranch::Kick => 0.0,
        }
    }
}

/// Closest yardline from which this kicker attempts a field goal.
pub fn field_goal_range(kick_power: f64) -> f64 {
    (65.0 - (kick_power - 50.0) / 5.0).round()
}

pub fn decide_fourth_down(
    rng: &mut impl Rng,
    yardline: f64,
    distance: f64,
    kick_power: f64,
) -> FourthDownDecision {
    let branch = FourthDownBranch::classify(yardline, distance);
    if roll(rng, branch.go_probability()) {
        return FourthDownDecision::GoForIt;
    }
    if yardline >= field_goal_range(kick_power) {
        FourthDownDecision::FieldGoal
    } else {
        FourthDownDecision::Punt
    }
}
