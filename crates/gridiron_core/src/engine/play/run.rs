//! Designed runs.

use super::tackles::assign_tackles;
use super::{clamp_to_goal_line, PlayOutcome};
use crate::config::FatigueConfig;
use crate::engine::drive::DriveState;
use crate::engine::fatigue::apply_run_exertion;
use crate::engine::sampling::{pick_weighted, roll};
use crate::models::{rating, Player, Position, StatKey};
use rand::Rng;

const BASE_YARDS: f64 = 4.5;
const BLOCKING_DIVISOR: f64 = 750.0;
const EXPLOSIVE_SPEED: f64 = 75.0;
const EXPLOSIVE_CHANCE: f64 = 0.10;
const STUFFED_CHANCE: f64 = 0.50;
const SHORT_YARDAGE_CHANCE: f64 = 0.60;

/// Expected gain before blocking, by down.
pub fn base_yards(down: u8, distance: f64) -> f64 {
    match down {
        2 => BASE_YARDS - 0.5,
        3 if distance > 6.0 => (BASE_YARDS - 1.0) * 0.75,
        3 => BASE_YARDS - 1.0,
        _ => BASE_YARDS,
    }
}

/// Signed multiplier nudge from a rating's distance to average.
///
/// Fires with probability proportional to the rating (or its complement
/// below 50). Returns `+r/250` for a good rating, `-(100-r)/250` for a poor
/// one, 0 when it does not fire.
fn rating_swing(rng: &mut impl Rng, value: f64) -> f64 {
    let (chance, factor) = if value >= 50.0 {
        (value / 100.0 * 0.5, value / 250.0)
    } else {
        ((100.0 - value) / 100.0 * 0.5, -(100.0 - value) / 250.0)
    };
    if roll(rng, chance) {
        factor
    } else {
        0.0
    }
}

fn carrier_weight(player: &Player) -> f64 {
    match player.position {
        Position::RB => 0.8,
        Position::WR => 0.03,
        Position::QB if player.speed() > 60.0 => player.speed() / 1000.0,
        _ => 0.0,
    }
}

fn pick_carrier(rng: &mut impl Rng, offense: &[Player]) -> Option<usize> {
    let pool: Vec<usize> = offense
        .iter()
        .enumerate()
        .filter(|(_, p)| p.in_game && carrier_weight(p) > 0.0)
        .map(|(i, _)| i)
        .collect();
    if !pool.is_empty() {
        return pick_weighted(rng, &pool, |i| carrier_weight(&offense[i]));
    }

    log::warn!("No eligible ball carrier, handing off to anyone on the field");
    let everyone: Vec<usize> =
        offense.iter().enumerate().filter(|(_, p)| p.in_game).map(|(i, _)| i).collect();
    pick_weighted(rng, &everyone, |_| 1.0)
}

/// Defender credited with stripping the ball, by how far the run got.
fn pick_forcing_defender(rng: &mut impl Rng, defense: &[Player], yards: f64) -> Option<usize> {
    let eligible = |p: &Player| {
        if yards <= 2.0 {
            p.position.is_linebacker()
        } else if yards <= 7.0 {
            p.position.is_linebacker() || p.position == Position::S
        } else {
            p.position.is_secondary()
        }
    };
    let weight = |i: usize| (rating(defense[i].attrs().tackling) + defense[i].strength()) / 2.0;

    let pool: Vec<usize> = defense
        .iter()
        .enumerate()
        .filter(|(_, p)| p.in_game && eligible(p))
        .map(|(i, _)| i)
        .collect();
    if !pool.is_empty() {
        return pick_weighted(rng, &pool, weight);
    }
    let everyone: Vec<usize> =
        defense.iter().enumerate().filter(|(_, p)| p.in_game).map(|(i, _)| i).collect();
    pick_weighted(rng, &everyone, weight)
}

fn fumble_chance(carrier: &Player) -> f64 {
    0.003
        + (100.0 - carrier.strength()) / 100.0 * 0.005
        + (100.0 - carrier.intelligence()) / 100.0 * 0.005
}

pub fn resolve_run(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    state: &DriveState,
    guessed: bool,
    advantage: f64,
) -> (PlayOutcome, f64) {
    let mut yards = base_yards(state.down, state.distance) * (1.0 + advantage / BLOCKING_DIVISOR);

    // front seven: a sure tackler shrinks the gain, a poor one opens it up
    for p in defense.iter().filter(|p| p.in_game && p.position.is_front_seven()) {
        yards *= 1.0 - rating_swing(rng, rating(p.attrs().tackling));
    }

    let Some(carrier) = pick_carrier(rng, offense) else {
        log::warn!("Run called with nobody on the field");
        return (PlayOutcome::Run, 0.0);
    };

    let ball_carrier = &offense[carrier];
    let mut checks = vec![ball_carrier.speed(), ball_carrier.strength(), ball_carrier.intelligence()];
    if ball_carrier.position == Position::RB {
        checks.push(rating(ball_carrier.attrs().elusiveness));
        checks.push(rating(ball_carrier.attrs().vision));
    }
    for value in checks {
        yards *= 1.0 + rating_swing(rng, value);
    }

    if roll(rng, fumble_chance(&offense[carrier])) {
        offense[carrier].stats.incr(StatKey::Carries);
        offense[carrier].stats.incr(StatKey::Fumbles);
        if let Some(forcer) = pick_forcing_defender(rng, defense, yards) {
            defense[forcer].stats.incr(StatKey::ForcedFumbles);
            defense[forcer].stats.incr(StatKey::Tackles);
        }
        apply_run_exertion(offense, defense, Some(carrier), 0.0, config);
        return (PlayOutcome::Fumble, 0.0);
    }

    if offense[carrier].speed() > EXPLOSIVE_SPEED && roll(rng, EXPLOSIVE_CHANCE) {
        yards += f64::from(rng.gen_range(15..=40));
    }
    if guessed && roll(rng, STUFFED_CHANCE) {
        yards += f64::from(rng.gen_range(-10..=-1));
    }
    if state.distance <= 2.0 && yards > -1.25 && roll(rng, SHORT_YARDAGE_CHANCE) {
        yards = state.distance;
    }
    if yards < 2.0 {
        yards = yards.max(rng.gen_range(1.5..3.5));
    }

    let (yards, touchdown) = clamp_to_goal_line(state.yardline, yards.round());

    let stats = &mut offense[carrier].stats;
    stats.incr(StatKey::Carries);
    stats.add(StatKey::RushYards, yards);
    if touchdown {
        stats.incr(StatKey::Touchdowns);
    }
    apply_run_exertion(offense, defense, Some(carrier), yards, config);
    if !touchdown {
        assign_tackles(rng, defense, yards);
    }

    (PlayOutcome::Run, yards)
}
