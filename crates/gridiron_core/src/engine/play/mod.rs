//! Play Resolver
//!
//! One snap from the huddle to the whistle. Penalties are drawn first and
//! replace the play outright; otherwise both sides call a play and the run
//! or pass resolver produces a [`PlayOutcome`] with its yardage.

pub mod pass;
pub mod run;
pub mod tackles;

use super::drive::DriveState;
use super::fatigue;
use super::play_calling::{call_defense, call_offense, is_guessed, DefenseCall, LastPlay, PlayCall};
use super::sampling::{between, roll};
use crate::config::SimConfig;
use crate::models::{rating, Player, Position, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    FalseStart,
    Holding,
    OffensivePassInterference,
    DelayOfGame,
    Offside,
    DefensivePassInterference,
    FaceMask,
}

const OFFENSIVE_PENALTIES: [(Penalty, f64); 4] = [
    (Penalty::FalseStart, 0.30),
    (Penalty::Holding, 0.40),
    (Penalty::OffensivePassInterference, 0.15),
    (Penalty::DelayOfGame, 0.15),
];

const DEFENSIVE_PENALTIES: [(Penalty, f64); 3] = [
    (Penalty::Offside, 0.40),
    (Penalty::DefensivePassInterference, 0.40),
    (Penalty::FaceMask, 0.20),
];

impl Penalty {
    /// Signed yardage from the offense's point of view.
    pub fn yards(self, rng: &mut impl Rng) -> f64 {
        match self {
            Penalty::FalseStart | Penalty::DelayOfGame => -5.0,
            Penalty::Holding => -10.0,
            Penalty::OffensivePassInterference => -15.0,
            Penalty::Offside => 5.0,
            Penalty::DefensivePassInterference => f64::from(rng.gen_range(10..=25)),
            Penalty::FaceMask => 15.0,
        }
    }
}

fn draw_penalty(rng: &mut impl Rng, table: &[(Penalty, f64)]) -> Penalty {
    match table.choose_weighted(rng, |(_, w)| *w) {
        Ok((penalty, _)) => *penalty,
        Err(_) => unreachable!("penalty table weights are fixed and positive"),
    }
}

/// What happened on the snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "penalty")]
pub enum PlayOutcome {
    Run,
    Completion,
    Checkdown,
    Incomplete,
    Sack,
    Fumble,
    Interception,
    OffensivePenalty(Penalty),
    DefensivePenalty(Penalty),
}

impl PlayOutcome {
    pub fn is_turnover(self) -> bool {
        matches!(self, PlayOutcome::Fumble | PlayOutcome::Interception)
    }

    pub fn is_penalty(self) -> bool {
        matches!(self, PlayOutcome::OffensivePenalty(_) | PlayOutcome::DefensivePenalty(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub outcome: PlayOutcome,
    /// Signed gain for the offense
    pub yards: f64,
    /// `None` when a penalty replaced the play
    pub call: Option<PlayCall>,
    pub defense_call: Option<DefenseCall>,
    pub elapsed: i32,
}

/// Blocking minus rushing for the personnel involved in the two calls.
///
/// Offense: the line, plus tight ends on runs. Defense: the line, plus
/// linebackers when playing the run.
pub fn line_advantage(
    offense: &[Player],
    defense: &[Player],
    call: PlayCall,
    defense_call: DefenseCall,
) -> f64 {
    let blocking: f64 = offense
        .iter()
        .filter(|p| p.in_game)
        .filter(|p| p.position == Position::OL || (call == PlayCall::Run && p.position == Position::TE))
        .map(|p| {
            let skill = match call {
                PlayCall::Run => p.attrs().run_blocking,
                PlayCall::Pass => p.attrs().pass_blocking,
            };
            p.strength() + rating(skill)
        })
        .sum();

    let rushing: f64 = defense
        .iter()
        .filter(|p| p.in_game)
        .filter(|p| {
            p.position == Position::DL
                || (defense_call == DefenseCall::DefendRun && p.position.is_linebacker())
        })
        .map(|p| p.strength() + rating(p.attrs().rushing))
        .sum();

    blocking - rushing
}

/// Resolve one snap: fatigue bookkeeping, clock, penalties, then the play.
pub fn sim_play(
    rng: &mut impl Rng,
    config: &SimConfig,
    offense: &mut Team,
    defense: &mut Team,
    state: &DriveState,
    last: Option<&LastPlay>,
) -> PlayResult {
    fatigue::prepare_snap(offense, defense, &config.fatigue);
    let elapsed = between(rng, config.tempo.play_secs(state.seconds_remaining));

    if roll(rng, config.penalties.offensive_rate) {
        let penalty = draw_penalty(rng, &OFFENSIVE_PENALTIES);
        return PlayResult {
            outcome: PlayOutcome::OffensivePenalty(penalty),
            yards: penalty.yards(rng),
            call: None,
            defense_call: None,
            elapsed,
        };
    }
    if roll(rng, config.penalties.defensive_rate) {
        let penalty = draw_penalty(rng, &DEFENSIVE_PENALTIES);
        return PlayResult {
            outcome: PlayOutcome::DefensivePenalty(penalty),
            yards: penalty.yards(rng),
            call: None,
            defense_call: None,
            elapsed,
        };
    }

    let call = call_offense(rng, state.down, state.distance, last);
    let defense_call = call_defense(rng, state.down, state.distance);
    let guessed = is_guessed(call, defense_call);
    let advantage = line_advantage(&offense.offense, &defense.defense, call, defense_call);

    let (outcome, yards) = match call {
        PlayCall::Run => run::resolve_run(
            rng,
            &config.fatigue,
            &mut offense.offense,
            &mut defense.defense,
            state,
            guessed,
            advantage,
        ),
        PlayCall::Pass => pass::resolve_pass(
            rng,
            &config.fatigue,
            &mut offense.offense,
            &mut defense.defense,
            state,
            guessed,
            advantage,
        ),
    };

    PlayResult { outcome, yards, call: Some(call), defense_call: Some(defense_call), elapsed }
}

/// Yardage that reaches the end zone is cut to exactly the goal line.
pub(crate) fn clamp_to_goal_line(yardline: f64, yards: f64) -> (f64, bool) {
    if yardline + yards >= 100.0 {
        (100.0 - yardline, true)
    } else {
        (yards, false)
    }
}
