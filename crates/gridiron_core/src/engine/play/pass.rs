//! Pass plays.
//!
//! Order of events: sack check, then the quarterback works through the
//! progression until a receiver comes open. If nobody does, in order:
//! checkdown, interception, scramble, incompletion.

use super::tackles::assign_tackles;
use super::{clamp_to_goal_line, PlayOutcome};
use crate::config::FatigueConfig;
use crate::engine::drive::DriveState;
use crate::engine::fatigue::{apply_pass_exertion, apply_run_exertion};
use crate::engine::sampling::{gauss, pick_distinct_weighted, pick_weighted, roll, weighted_order};
use crate::models::{rating, Player, Position, StatKey};
use rand::seq::SliceRandom;
use rand::Rng;

const SPLIT_SACK_CHANCE: f64 = 0.25;
const CHECKDOWN_CHANCE: f64 = 0.18;
const INTERCEPTION_CAP: f64 = 0.03;
const EXPLOSIVE_CHANCE: f64 = 0.10;
const MAX_COMPLETION_YARDS: f64 = 40.0;
/// Share of target looks a back gets on an incompletion
const RB_TARGET_SHARE: f64 = 0.01;

fn in_game_where(players: &[Player], pred: impl Fn(&Player) -> bool) -> Vec<usize> {
    players.iter().enumerate().filter(|(_, p)| p.in_game && pred(p)).map(|(i, _)| i).collect()
}

pub fn sack_chance(down: u8, guessed: bool, advantage: f64) -> f64 {
    let mut chance = 0.005 + 0.005 * f64::from(down);
    if guessed {
        chance += 0.1;
    }
    chance - advantage / 5000.0
}

/// Sum of secondary coverage, the fixed drag on every progression read.
pub fn coverage_factor(defense: &[Player]) -> f64 {
    defense
        .iter()
        .filter(|p| p.in_game && p.position.is_secondary())
        .map(|p| rating(p.attrs().coverage) / 1000.0)
        .sum()
}

fn average_coverage_speed(defense: &[Player]) -> f64 {
    let speeds: Vec<f64> =
        defense.iter().filter(|p| p.in_game && p.position.is_secondary()).map(Player::speed).collect();
    if speeds.is_empty() {
        50.0
    } else {
        speeds.iter().sum::<f64>() / speeds.len() as f64
    }
}

fn receiver_weight(p: &Player) -> f64 {
    (rating(p.attrs().route_running) + rating(p.attrs().hands) + p.intelligence()) / 3.0
}

pub fn resolve_pass(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    state: &DriveState,
    guessed: bool,
    advantage: f64,
) -> (PlayOutcome, f64) {
    let Some(qb) = offense.iter().position(|p| p.in_game && p.position == Position::QB) else {
        log::warn!("Pass called without a quarterback on the field");
        return (PlayOutcome::Incomplete, 0.0);
    };

    if roll(rng, sack_chance(state.down, guessed, advantage)) {
        return resolve_sack(rng, config, offense, defense, qb, guessed);
    }

    let coverage = coverage_factor(defense);
    let qb_player = &offense[qb];
    let mut completion = 0.35
        + (qb_player.intelligence()
            + rating(qb_player.attrs().passing)
            + rating(qb_player.attrs().decision_making))
            / 1000.0;

    let tight_ends = in_game_where(offense, |p| p.position == Position::TE).len();
    if state.down == 3 || state.yardline > 80.0 {
        completion += 0.05 * tight_ends as f64;
    }

    let receivers = in_game_where(offense, |p| matches!(p.position, Position::WR | Position::TE));
    let progression = weighted_order(rng, &receivers, |i| receiver_weight(&offense[i]));
    for target in progression {
        let receiver = &offense[target];
        completion += (rating(receiver.attrs().route_running) - 50.0) / 200.0
            + (receiver.speed() - 50.0) / 300.0
            - coverage / 1.9;
        if completion < 0.0 {
            completion = 0.01;
        }
        if roll(rng, completion) {
            return complete_pass(rng, config, offense, defense, state, qb, target);
        }
        completion -= 0.05;
    }

    if roll(rng, CHECKDOWN_CHANCE) {
        let backs = in_game_where(offense, |p| p.position == Position::RB);
        if let Some(&back) = backs.choose(rng) {
            return checkdown(rng, config, offense, defense, state, qb, back);
        }
    }

    if let Some(result) = try_interception(rng, config, offense, defense, qb, guessed) {
        return result;
    }

    if let Some(result) = try_scramble(rng, config, offense, defense, state, qb) {
        return result;
    }

    incomplete(rng, config, offense, defense, qb)
}

fn resolve_sack(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    qb: usize,
    guessed: bool,
) -> (PlayOutcome, f64) {
    let yards = -gauss(rng, 8.0, 2.0).abs().trunc();

    let mut rushers = in_game_where(defense, |p| {
        p.position == Position::DL || (guessed && p.position.is_linebacker())
    });
    if rushers.is_empty() {
        log::warn!("No pass rushers on the field, crediting the sack to anyone on defense");
        rushers = in_game_where(defense, |_| true);
    }
    let weight = |i: usize| rating(defense[i].attrs().rushing);
    let sackers = if roll(rng, SPLIT_SACK_CHANCE) {
        pick_distinct_weighted(rng, &rushers, 2, weight)
    } else {
        pick_weighted(rng, &rushers, weight).into_iter().collect()
    };
    let share = if sackers.len() == 2 { 0.5 } else { 1.0 };
    for &i in &sackers {
        defense[i].stats.add(StatKey::Sacks, share);
        defense[i].stats.incr(StatKey::Tackles);
    }
    offense[qb].stats.incr(StatKey::SacksTaken);
    apply_pass_exertion(offense, defense, None, 0.0, config);

    let fumble_chance = 0.02
        + (100.0 - offense[qb].strength()) / 100.0 * 0.01
        + (100.0 - offense[qb].intelligence()) / 100.0 * 0.005;
    if roll(rng, fumble_chance) {
        offense[qb].stats.incr(StatKey::Fumbles);
        for &i in &sackers {
            defense[i].stats.add(StatKey::ForcedFumbles, share);
        }
        return (PlayOutcome::Fumble, 0.0);
    }

    (PlayOutcome::Sack, yards)
}

fn credit_reception(offense: &mut [Player], qb: usize, target: usize, yards: f64, touchdown: bool) {
    let passer = &mut offense[qb].stats;
    passer.incr(StatKey::PassAttempts);
    passer.incr(StatKey::Completions);
    passer.add(StatKey::PassYards, yards);
    if touchdown {
        passer.incr(StatKey::Touchdowns);
    }

    let catcher = &mut offense[target].stats;
    catcher.incr(StatKey::Targets);
    catcher.incr(StatKey::Receptions);
    catcher.add(StatKey::ReceivingYards, yards);
    if touchdown {
        catcher.incr(StatKey::Touchdowns);
    }
}

fn complete_pass(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    state: &DriveState,
    qb: usize,
    target: usize,
) -> (PlayOutcome, f64) {
    let speed_ratio = offense[target].speed() / average_coverage_speed(defense);
    let mut yards = gauss(rng, 9.5, 4.0) * speed_ratio;
    if speed_ratio > 1.0 && roll(rng, EXPLOSIVE_CHANCE) {
        yards = f64::from(rng.gen_range(20..=70));
    }
    let yards = yards.round().min(MAX_COMPLETION_YARDS);
    let (yards, touchdown) = clamp_to_goal_line(state.yardline, yards);

    credit_reception(offense, qb, target, yards, touchdown);
    apply_pass_exertion(offense, defense, Some(target), yards, config);
    if !touchdown {
        assign_tackles(rng, defense, yards);
    }
    (PlayOutcome::Completion, yards)
}

fn checkdown(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    state: &DriveState,
    qb: usize,
    back: usize,
) -> (PlayOutcome, f64) {
    let mut yards = gauss(rng, 3.0, 2.0);
    if roll(rng, offense[back].speed() / 100.0) {
        yards += f64::from(rng.gen_range(1..=9));
    }
    let (yards, touchdown) = clamp_to_goal_line(state.yardline, yards.max(0.0).round());

    credit_reception(offense, qb, back, yards, touchdown);
    apply_pass_exertion(offense, defense, Some(back), yards, config);
    if !touchdown {
        assign_tackles(rng, defense, yards);
    }
    (PlayOutcome::Checkdown, yards)
}

fn try_interception(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    qb: usize,
    guessed: bool,
) -> Option<(PlayOutcome, f64)> {
    let decision = rating(offense[qb].attrs().decision_making);
    let risk = |p: &Player| {
        let mut chance = 0.02 + rating(p.attrs().coverage) / 10_000.0 + (100.0 - decision) / 2000.0;
        if guessed {
            chance += 0.005;
        }
        chance
    };

    let candidates = in_game_where(defense, |p| {
        p.position.is_secondary() || (guessed && p.position.is_linebacker())
    });
    let (defender, chance) = candidates
        .iter()
        .map(|&i| (i, risk(&defense[i])))
        .fold(None, |best: Option<(usize, f64)>, (i, c)| match best {
            Some((_, b)) if b >= c => best,
            _ => Some((i, c)),
        })?;

    if !roll(rng, chance.min(INTERCEPTION_CAP)) {
        return None;
    }
    offense[qb].stats.incr(StatKey::PassAttempts);
    offense[qb].stats.incr(StatKey::InterceptionsThrown);
    defense[defender].stats.incr(StatKey::Interceptions);
    apply_pass_exertion(offense, defense, None, 0.0, config);
    Some((PlayOutcome::Interception, 0.0))
}

pub fn scramble_chance(qb: &Player) -> f64 {
    let chance = ((100.0 - qb.intelligence()) / 150.0).max(0.05);
    if qb.speed() < 60.0 {
        chance * 0.5
    } else {
        chance
    }
}

fn try_scramble(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    state: &DriveState,
    qb: usize,
) -> Option<(PlayOutcome, f64)> {
    if !roll(rng, scramble_chance(&offense[qb])) {
        return None;
    }
    let gain_odds = (0.5 + (offense[qb].speed() - 50.0) / 100.0).clamp(0.1, 0.95);
    let yards = if roll(rng, gain_odds) {
        rng.gen_range(1..=12)
    } else {
        rng.gen_range(-6..=-1)
    };
    let (yards, touchdown) = clamp_to_goal_line(state.yardline, f64::from(yards));

    let stats = &mut offense[qb].stats;
    stats.incr(StatKey::Carries);
    stats.add(StatKey::RushYards, yards);
    if touchdown {
        stats.incr(StatKey::Touchdowns);
    }
    apply_run_exertion(offense, defense, Some(qb), yards, config);
    if !touchdown {
        assign_tackles(rng, defense, yards);
    }
    Some((PlayOutcome::Run, yards))
}

fn incomplete(
    rng: &mut impl Rng,
    config: &FatigueConfig,
    offense: &mut [Player],
    defense: &mut [Player],
    qb: usize,
) -> (PlayOutcome, f64) {
    let targets = in_game_where(offense, |p| {
        matches!(p.position, Position::WR | Position::TE | Position::RB)
    });
    let is_back = |i: usize| offense[i].position == Position::RB;
    let downfield: f64 = targets.iter().filter(|&&i| !is_back(i)).map(|&i| receiver_weight(&offense[i])).sum();
    let backs = targets.iter().filter(|&&i| is_back(i)).count().max(1) as f64;
    let back_weight = RB_TARGET_SHARE * downfield / backs;

    let intended = pick_weighted(rng, &targets, |i| {
        if is_back(i) {
            back_weight
        } else {
            receiver_weight(&offense[i])
        }
    });

    offense[qb].stats.incr(StatKey::PassAttempts);
    if let Some(t) = intended {
        offense[t].stats.incr(StatKey::Targets);
    }
    apply_pass_exertion(offense, defense, intended, 0.0, config);
    (PlayOutcome::Incomplete, 0.0)
}
