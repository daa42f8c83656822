//! Special-Teams Resolver
//!
//! Kickoffs, field goals, punts and extra points. Each is an independent
//! probability model over the kicker's or punter's ratings. Yardlines are
//! from the kicking team's point of view unless stated otherwise.

use super::sampling::{between, gauss, roll};
use crate::config::TempoConfig;
use crate::models::{rating, Player, StatKey};
use rand::Rng;
use serde::{Deserialize, Serialize};

// === Kickoff ===

const KICKOFF_OUT_OF_BOUNDS_SPOT: f64 = 40.0;
const KICKOFF_TOUCHBACK_SPOT: f64 = 25.0;
const FAIR_CATCH_CHANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickoffResult {
    OutOfBounds,
    Touchback,
    FairCatch,
    Returned,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kickoff {
    pub result: KickoffResult,
    /// Receiving team's starting yardline
    pub start_yardline: f64,
    pub elapsed: i32,
}

pub fn kickoff(rng: &mut impl Rng, tempo: &TempoConfig, kicker: &Player) -> Kickoff {
    let power = rating(kicker.attrs().kick_power);
    let accuracy = rating(kicker.attrs().kick_accuracy);
    let elapsed = between(rng, tempo.kickoff_secs);

    let landing = (45.0 + power * 0.5 + rng.gen_range(-5.0..=5.0)).clamp(0.0, 100.0);
    let out_of_bounds = (0.15 - accuracy / 100.0 * 0.15).max(0.01);

    let (result, spot) = if roll(rng, out_of_bounds) {
        (KickoffResult::OutOfBounds, KICKOFF_OUT_OF_BOUNDS_SPOT)
    } else if landing >= 95.0 {
        (KickoffResult::Touchback, KICKOFF_TOUCHBACK_SPOT)
    } else if roll(rng, FAIR_CATCH_CHANCE) {
        (KickoffResult::FairCatch, 100.0 - landing.round())
    } else {
        let return_yards = f64::from(rng.gen_range(10..=35));
        (KickoffResult::Returned, (100.0 - landing + return_yards).round())
    };

    let kick = Kickoff { result, start_yardline: spot.clamp(1.0, 99.0), elapsed };
    log::debug!("Kickoff by {}: {:?}, receiving at {}", kicker.name, kick.result, kick.start_yardline);
    kick
}

// === Field goal ===

/// Kick distance from the line of scrimmage: snap plus end zone.
pub fn field_goal_distance(yardline: f64) -> f64 {
    100.0 - yardline + 17.0
}

/// Make probability by distance, shifted by accuracy.
pub fn field_goal_probability(distance: f64, accuracy: f64) -> f64 {
    let base = match distance {
        d if d <= 30.0 => 0.98,
        d if d <= 39.0 => 0.94,
        d if d <= 49.0 => 0.85,
        d if d <= 55.0 => 0.65,
        _ => 0.40,
    };
    (base + (accuracy - 50.0) * 0.005).clamp(0.05, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGoal {
    pub made: bool,
    pub distance: f64,
    pub elapsed: i32,
}

pub fn attempt_field_goal(
    rng: &mut impl Rng,
    tempo: &TempoConfig,
    kicker: &mut Player,
    yardline: f64,
) -> FieldGoal {
    let distance = field_goal_distance(yardline);
    let chance = field_goal_probability(distance, rating(kicker.attrs().kick_accuracy));
    let elapsed = between(rng, tempo.field_goal_secs);

    kicker.stats.incr(StatKey::FieldGoalsAttempted);
    let made = roll(rng, chance);
    if made {
        kicker.stats.incr(StatKey::FieldGoalsMade);
    }
    log::debug!(
        "{} yard field goal by {} is {}",
        distance,
        kicker.name,
        if made { "good" } else { "no good" }
    );
    FieldGoal { made, distance, elapsed }
}

// === Punt ===

const PUNT_TOUCHBACK_SPOT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuntResult {
    /// Long way from the end zone, downed where it lands
    Downed,
    /// Placed inside the 5
    Pinned,
    Touchback,
    Returned,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Punt {
    pub result: PuntResult,
    /// Final spot, kicking team's yardline
    pub spot: f64,
    pub elapsed: i32,
}

impl Punt {
    /// Net yards credited to the punter
    pub fn net_yards(&self, from: f64) -> f64 {
        self.spot - from
    }
}

pub fn punt_distance(rng: &mut impl Rng, punter: &Player) -> f64 {
    let power = rating(punter.attrs().punt_power);
    gauss(rng, 47.0, 4.0).trunc() + ((power - 50.0) / 5.0).round()
}

/// Where a punt of `distance` from `yardline` ends up.
///
/// Punts that land more than 10 yards short of the goal line are downed.
/// Anything closer needs placement: a ball reaching the 5 is either pinned
/// or goes for a touchback, otherwise it is fielded and returned.
pub fn place_punt(rng: &mut impl Rng, yardline: f64, distance: f64, accuracy: f64) -> (PuntResult, f64) {
    let landing = yardline + distance;
    if landing + 10.0 < 100.0 {
        return (PuntResult::Downed, landing);
    }

    let pin_chance = 0.25 + (accuracy - 50.0) / 100.0;
    if landing >= 95.0 {
        if roll(rng, pin_chance) {
            (PuntResult::Pinned, 100.0 - f64::from(rng.gen_range(1..=4)))
        } else {
            (PuntResult::Touchback, PUNT_TOUCHBACK_SPOT)
        }
    } else {
        let return_yards = f64::from(rng.gen_range(0..=15));
        (PuntResult::Returned, (landing - return_yards).max(1.0))
    }
}

pub fn punt(rng: &mut impl Rng, tempo: &TempoConfig, punter: &mut Player, yardline: f64) -> Punt {
    let distance = punt_distance(rng, punter);
    let (result, spot) = place_punt(rng, yardline, distance, rating(punter.attrs().punt_accuracy));
    let elapsed = between(rng, tempo.punt_secs);

    let kick = Punt { result, spot, elapsed };
    punter.stats.incr(StatKey::Punts);
    punter.stats.add(StatKey::PuntYards, kick.net_yards(yardline));
    log::debug!("Punt by {} from {}: {:?} at {}", punter.name, yardline, result, spot);
    kick
}

// === Extra point ===

pub fn extra_point_probability(accuracy: f64) -> f64 {
    (0.94 + (accuracy - 50.0) * 0.005).clamp(0.80, 0.99)
}

pub fn attempt_extra_point(rng: &mut impl Rng, kicker: &mut Player) -> bool {
    let chance = extra_point_probability(rating(kicker.attrs().kick_accuracy));
    kicker.stats.incr(StatKey::PatAttempts);
    let made = roll(rng, chance);
    if made {
        kicker.stats.incr(StatKey::PatMade);
    }
    made
}
