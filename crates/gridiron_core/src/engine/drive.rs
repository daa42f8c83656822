//! Drive State Machine
//!
//! A drive is a sequence of snaps by one offense. [`DriveState::apply`] is the
//! whole transition function; [`sim_drive`] feeds it plays until the state
//! becomes terminal, the offense kicks on fourth down, or the clock runs out.

use super::play::{sim_play, PlayOutcome, PlayResult};
use super::play_calling::{decide_fourth_down, FourthDownDecision, LastPlay};
use super::special_teams::{attempt_field_goal, punt, FieldGoal, Punt};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::models::{rating, Position, Team};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Down marker for a lost possession
pub const TURNOVER_DOWN: u8 = 5;
/// Down marker for a score
pub const TOUCHDOWN_DOWN: u8 = 6;

const FIRST_DOWN_DISTANCE: f64 = 10.0;

/// Down, distance, field position and clock before a snap.
///
/// `yardline` runs from the offense's own goal line (0) to the opponent's
/// (100). Downs 1 to 4 are live; [`TURNOVER_DOWN`] and [`TOUCHDOWN_DOWN`] are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveState {
    pub down: u8,
    pub distance: f64,
    pub yardline: f64,
    pub seconds_remaining: i32,
}

impl DriveState {
    /// First and ten
    pub fn new(yardline: f64, seconds_remaining: i32) -> Self {
        Self { down: 1, distance: FIRST_DOWN_DISTANCE, yardline, seconds_remaining }
    }

    pub fn is_terminal(&self) -> bool {
        self.down >= TURNOVER_DOWN
    }

    pub fn is_touchdown(&self) -> bool {
        self.down == TOUCHDOWN_DOWN
    }

    /// State after `play`. Clock always runs.
    pub fn apply(&self, play: &PlayResult) -> DriveState {
        let mut next = *self;
        next.seconds_remaining -= play.elapsed;

        match play.outcome {
            PlayOutcome::Run | PlayOutcome::Completion | PlayOutcome::Checkdown | PlayOutcome::Sack => {
                next.yardline = (self.yardline + play.yards).clamp(0.0, 100.0);
                next.distance -= next.yardline - self.yardline;
                next.down += 1;
            }
            PlayOutcome::Fumble | PlayOutcome::Interception => {
                next.down = TURNOVER_DOWN;
            }
            PlayOutcome::Incomplete => {
                next.down += 1;
            }
            // no down is consumed by a flag
            PlayOutcome::OffensivePenalty(_) => {
                next.yardline = (self.yardline + play.yards).clamp(0.0, 99.0);
                next.distance += self.yardline - next.yardline;
            }
            PlayOutcome::DefensivePenalty(_) => {
                next.yardline = (self.yardline + play.yards).clamp(1.0, 99.0);
                next.distance = (next.distance - (next.yardline - self.yardline)).max(0.0);
            }
        }

        if next.distance <= 0.0 {
            next.down = 1;
            next.distance = FIRST_DOWN_DISTANCE;
        }
        if next.yardline >= 100.0 {
            next.down = TOUCHDOWN_DOWN;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveResult {
    Touchdown,
    FieldGoal,
    MissedFieldGoal,
    Punt,
    Turnover,
    TurnoverOnDowns,
    EndOfHalf,
}

/// One snap of the play log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub before: DriveState,
    pub play: PlayResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveSummary {
    pub offense: String,
    pub start_yardline: f64,
    pub plays: Vec<PlayRecord>,
    pub result: DriveResult,
    /// Where the ball is when the drive ends, offense's yardline. For a
    /// punt this is the final spot of the kick.
    pub end_yardline: f64,
    pub seconds_remaining: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_goal: Option<FieldGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punt: Option<Punt>,
}

impl DriveSummary {
    fn new(offense: &Team, start: &DriveState) -> Self {
        Self {
            offense: offense.name.clone(),
            start_yardline: start.yardline,
            plays: Vec::new(),
            result: DriveResult::EndOfHalf,
            end_yardline: start.yardline,
            seconds_remaining: start.seconds_remaining,
            field_goal: None,
            punt: None,
        }
    }

    fn finish(mut self, result: DriveResult, state: &DriveState) -> Self {
        self.result = result;
        self.end_yardline = state.yardline;
        self.seconds_remaining = state.seconds_remaining;
        log::debug!(
            "{} drive from {}: {:?} after {} plays at {} ({}s left)",
            self.offense,
            self.start_yardline,
            self.result,
            self.plays.len(),
            self.end_yardline,
            self.seconds_remaining
        );
        self
    }
}

/// Play one possession from `start_yardline` with `seconds_remaining` left
/// in the half.
///
/// Fails when the configuration is invalid or either team is missing
/// mandatory personnel.
pub fn sim_drive(
    rng: &mut impl Rng,
    config: &SimConfig,
    offense: &mut Team,
    defense: &mut Team,
    start_yardline: f64,
    seconds_remaining: i32,
) -> Result<DriveSummary> {
    config.validate()?;
    offense.validate()?;
    defense.validate()?;

    let mut state = DriveState::new(start_yardline, seconds_remaining);
    let mut summary = DriveSummary::new(offense, &state);
    let mut last: Option<LastPlay> = None;

    loop {
        if state.seconds_remaining <= 0 {
            return Ok(summary.finish(DriveResult::EndOfHalf, &state));
        }

        if state.down == 4 {
            let kick_power = offense.kicker().map_or(rating(None), |k| rating(k.attrs().kick_power));
            match decide_fourth_down(rng, state.yardline, state.distance, kick_power) {
                FourthDownDecision::GoForIt => {
                    log::trace!("{} going for it on 4th and {:.1}", offense.name, state.distance);
                }
                FourthDownDecision::FieldGoal => {
                    let team = offense.name.clone();
                    let kicker = offense.kicker_mut().ok_or_else(|| missing(&team, Position::K))?;
                    let fg = attempt_field_goal(rng, &config.tempo, kicker, state.yardline);
                    state.seconds_remaining -= fg.elapsed;
                    let result = if fg.made { DriveResult::FieldGoal } else { DriveResult::MissedFieldGoal };
                    summary.field_goal = Some(fg);
                    return Ok(summary.finish(result, &state));
                }
                FourthDownDecision::Punt => {
                    let team = offense.name.clone();
                    let punter = offense.punter_mut().ok_or_else(|| missing(&team, Position::P))?;
                    let kick = punt(rng, &config.tempo, punter, state.yardline);
                    state.seconds_remaining -= kick.elapsed;
                    state.yardline = kick.spot;
                    summary.punt = Some(kick);
                    return Ok(summary.finish(DriveResult::Punt, &state));
                }
            }
        }

        let play = sim_play(rng, config, offense, defense, &state, last.as_ref());
        let next = state.apply(&play);
        log::trace!(
            "{} {} and {:.1} at {:.1}: {:?} for {:.1}",
            offense.name,
            state.down,
            state.distance,
            state.yardline,
            play.outcome,
            play.yards
        );
        summary.plays.push(PlayRecord { before: state, play });
        last = play.call.map(|call| LastPlay { call, yards: play.yards });
        state = next;

        if state.is_touchdown() {
            return Ok(summary.finish(DriveResult::Touchdown, &state));
        }
        if state.down == TURNOVER_DOWN {
            let result = if play.outcome.is_turnover() {
                DriveResult::Turnover
            } else {
                DriveResult::TurnoverOnDowns
            };
            return Ok(summary.finish(result, &state));
        }
    }
}

fn missing(team: &str, position: Position) -> SimError {
    SimError::IncompleteRoster { team: team.to_string(), position }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::play::Penalty;
    use crate::engine::play_calling::PlayCall;
    use crate::test_fixtures::{average_team, seeded_rng};
    use proptest::prelude::*;

    fn play(outcome: PlayOutcome, yards: f64) -> PlayResult {
        PlayResult { outcome, yards, call: Some(PlayCall::Run), defense_call: None, elapsed: 30 }
    }

    fn state(down: u8, distance: f64, yardline: f64) -> DriveState {
        DriveState { down, distance, yardline, seconds_remaining: 1800 }
    }

    #[test]
    fn test_gain_past_the_sticks_resets_downs() {
        let next = state(3, 4.0, 40.0).apply(&play(PlayOutcome::Run, 6.0));
        assert_eq!(next.down, 1);
        assert_eq!(next.distance, 10.0);
        assert_eq!(next.yardline, 46.0);
        assert_eq!(next.seconds_remaining, 1770);
    }

    #[test]
    fn test_short_gain_advances_down() {
        let next = state(1, 10.0, 40.0).apply(&play(PlayOutcome::Completion, 4.0));
        assert_eq!((next.down, next.distance, next.yardline), (2, 6.0, 44.0));
    }

    #[test]
    fn test_sack_at_own_goal_line_clamps() {
        let next = state(2, 10.0, 3.0).apply(&play(PlayOutcome::Sack, -8.0));
        assert_eq!(next.yardline, 0.0);
        // credited loss is the actual 3 yards
        assert_eq!(next.distance, 13.0);
        assert_eq!(next.down, 3);
    }

    #[test]
    fn test_failed_fourth_down_is_turnover_marker() {
        let next = state(4, 3.0, 60.0).apply(&play(PlayOutcome::Incomplete, 0.0));
        assert_eq!(next.down, TURNOVER_DOWN);
        let next = state(4, 3.0, 60.0).apply(&play(PlayOutcome::Run, 5.0));
        assert_eq!(next.down, 1, "converted fourth down keeps the ball");
    }

    #[test]
    fn test_turnover_beats_any_down() {
        for down in 1..=4 {
            let next = state(down, 5.0, 50.0).apply(&play(PlayOutcome::Interception, 0.0));
            assert_eq!(next.down, TURNOVER_DOWN);
        }
    }

    #[test]
    fn test_penalties_do_not_consume_downs() {
        let flag = |p, y| PlayResult {
            outcome: p,
            yards: y,
            call: None,
            defense_call: None,
            elapsed: 30,
        };
        let next = state(2, 7.0, 30.0).apply(&flag(PlayOutcome::OffensivePenalty(Penalty::Holding), -10.0));
        assert_eq!((next.down, next.distance, next.yardline), (2, 17.0, 20.0));

        let next = state(2, 7.0, 2.0).apply(&flag(PlayOutcome::OffensivePenalty(Penalty::FalseStart), -5.0));
        assert_eq!((next.yardline, next.distance), (0.0, 9.0));

        let next = state(3, 4.0, 30.0).apply(&flag(PlayOutcome::DefensivePenalty(Penalty::Offside), 5.0));
        assert_eq!((next.down, next.distance), (1, 10.0), "flag moved the chains");

        let next = state(3, 8.0, 97.0).apply(&flag(PlayOutcome::DefensivePenalty(Penalty::FaceMask), 15.0));
        assert_eq!(next.yardline, 99.0);
        assert_eq!((next.down, next.distance), (3, 6.0));
    }

    #[test]
    fn test_touchdown_marker() {
        let next = state(4, 2.0, 98.0).apply(&play(PlayOutcome::Run, 2.0));
        assert_eq!(next.down, TOUCHDOWN_DOWN);
        assert!(next.is_touchdown() && next.is_terminal());
    }

    proptest! {
        #[test]
        fn prop_transition_invariants(
            down in 1u8..=4,
            distance in 1.0f64..30.0,
            yardline in 1.0f64..99.0,
            yards in -20.0f64..80.0,
            kind in 0usize..9,
        ) {
            let outcome = match kind {
                0 => PlayOutcome::Run,
                1 => PlayOutcome::Completion,
                2 => PlayOutcome::Checkdown,
                3 => PlayOutcome::Sack,
                4 => PlayOutcome::Incomplete,
                5 => PlayOutcome::Fumble,
                6 => PlayOutcome::Interception,
                7 => PlayOutcome::OffensivePenalty(Penalty::Holding),
                _ => PlayOutcome::DefensivePenalty(Penalty::FaceMask),
            };
            let before = state(down, distance, yardline);
            let next = before.apply(&play(outcome, yards));

            prop_assert!((0.0..=100.0).contains(&next.yardline));
            prop_assert!((1..=TOUCHDOWN_DOWN).contains(&next.down));
            if next.down <= 4 {
                prop_assert!(next.distance > 0.0);
            }
            if next.yardline >= 100.0 {
                prop_assert_eq!(next.down, TOUCHDOWN_DOWN);
            }
            if outcome.is_turnover() {
                prop_assert_eq!(next.down, TURNOVER_DOWN);
                prop_assert_eq!(next.yardline, yardline);
            }
            if outcome.is_penalty() {
                prop_assert!(next.down == down || next.down == 1);
            }
        }
    }

    #[test]
    fn test_sim_drive_is_deterministic() {
        let config = SimConfig::default();
        let run = |seed| {
            let mut rng = seeded_rng(seed);
            let mut offense = average_team("Hawks");
            let mut defense = average_team("Owls");
            let drives: Vec<DriveSummary> = (0..10)
                .map(|_| sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 1800).unwrap())
                .collect();
            (drives, offense.stat_totals())
        };
        assert_eq!(run(2024), run(2024));
    }

    #[test]
    fn test_drive_always_terminates_with_consistent_state() {
        let config = SimConfig::default();
        let mut rng = seeded_rng(77);
        let mut offense = average_team("Hawks");
        let mut defense = average_team("Owls");
        for _ in 0..300 {
            let summary = sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 2400).unwrap();
            match summary.result {
                DriveResult::Touchdown => assert_eq!(summary.end_yardline, 100.0),
                DriveResult::Punt => assert!(summary.punt.is_some()),
                DriveResult::FieldGoal | DriveResult::MissedFieldGoal => {
                    assert!(summary.field_goal.is_some())
                }
                DriveResult::EndOfHalf => assert!(summary.seconds_remaining <= 0),
                DriveResult::Turnover | DriveResult::TurnoverOnDowns => {
                    assert!(summary.end_yardline < 100.0)
                }
            }
            assert!(!summary.plays.is_empty());
        }
    }

    #[test]
    fn test_converted_fourth_down_continues_drive() {
        let config = SimConfig::without_penalties();
        let mut rng = seeded_rng(404);
        let mut offense = average_team("Hawks");
        let mut defense = average_team("Owls");
        let mut continued = 0;
        for _ in 0..1_000 {
            let summary = sim_drive(&mut rng, &config, &mut offense, &mut defense, 50.0, 2400).unwrap();
            let plays = &summary.plays;
            continued += plays
                .windows(2)
                .filter(|w| w[0].before.down == 4 && w[1].before.down == 1)
                .count();
        }
        assert!(continued > 0);
    }

    #[test]
    fn test_clock_ends_the_drive() {
        let config = SimConfig::default();
        let mut rng = seeded_rng(5);
        let mut offense = average_team("Hawks");
        let mut defense = average_team("Owls");

        let summary = sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 0).unwrap();
        assert_eq!(summary.result, DriveResult::EndOfHalf);
        assert!(summary.plays.is_empty());

        for _ in 0..50 {
            let summary = sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 20).unwrap();
            // one hurried snap always runs before the clock is checked again
            assert!(!summary.plays.is_empty());
            if summary.result == DriveResult::EndOfHalf {
                assert!(summary.seconds_remaining <= 0);
            }
        }
    }

    #[test]
    fn test_missing_punter_fails_fast() {
        let config = SimConfig::default();
        let mut rng = seeded_rng(6);
        let mut offense = average_team("Hawks");
        offense.offense.retain(|p| p.position != Position::P);
        let mut defense = average_team("Owls");
        let err = sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 1800).unwrap_err();
        assert!(matches!(err, SimError::IncompleteRoster { position: Position::P, .. }));
    }

    #[test]
    fn test_invalid_config_rejected_before_the_snap() {
        let mut config = SimConfig::default();
        config.tempo.punt_secs = (10, 6);
        let mut rng = seeded_rng(8);
        let mut offense = average_team("Hawks");
        let mut defense = average_team("Owls");
        let err = sim_drive(&mut rng, &config, &mut offense, &mut defense, 25.0, 1800).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        assert!(offense.stat_totals().is_empty());
    }
}
