//! Game Loop
//!
//! Two halves of alternating possessions. Every half opens with a kickoff;
//! every score is followed by a kickoff from the scoring team; every other
//! drive result hands the ball over where the drive left it.

use super::drive::{sim_drive, DriveResult, DriveSummary};
use super::fatigue::apply_baseline_fatigue;
use super::sampling::roll;
use super::special_teams::{attempt_extra_point, kickoff};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::models::{BoxScore, Position, RosterSource, Team, TeamBox};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn other(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

/// A drive in the game log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveLog {
    pub half: u8,
    pub offense: TeamSide,
    pub summary: DriveSummary,
}

/// Everything that persists across drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub home: Team,
    pub away: Team,
    /// Indexed home, away
    pub score: [u32; 2],
    pub half: u8,
    pub seconds_remaining: i32,
    pub possession: TeamSide,
    pub drives: Vec<DriveLog>,
}

impl GameState {
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home,
            away,
            score: [0, 0],
            half: 0,
            seconds_remaining: 0,
            possession: TeamSide::Home,
            drives: Vec::new(),
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// (offense, defense) with `side` on offense
    pub fn matchup_mut(&mut self, side: TeamSide) -> (&mut Team, &mut Team) {
        match side {
            TeamSide::Home => (&mut self.home, &mut self.away),
            TeamSide::Away => (&mut self.away, &mut self.home),
        }
    }

    pub fn score_of(&self, side: TeamSide) -> u32 {
        self.score[side.index()]
    }

    fn add_points(&mut self, side: TeamSide, points: u32) {
        self.score[side.index()] += points;
    }

    /// Drives with at least one snap
    pub fn drive_count(&self, side: TeamSide) -> u32 {
        self.drives.iter().filter(|d| d.offense == side && !d.summary.plays.is_empty()).count() as u32
    }

    pub fn box_score(&self) -> BoxScore {
        BoxScore {
            home: TeamBox::from_team(&self.home, self.score_of(TeamSide::Home), self.drive_count(TeamSide::Home)),
            away: TeamBox::from_team(&self.away, self.score_of(TeamSide::Away), self.drive_count(TeamSide::Away)),
        }
    }
}

/// Owns the game state, the configuration and the random source.
pub struct GameSimulator<R: Rng = ChaCha8Rng> {
    state: GameState,
    config: SimConfig,
    rng: R,
}

impl GameSimulator<ChaCha8Rng> {
    /// Seeded simulator; the same seed and rosters replay the same game.
    pub fn new<S: RosterSource + ?Sized>(source: &S, config: SimConfig, seed: u64) -> Result<Self> {
        Self::with_rng(source, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSimulator<R> {
    /// The first two teams from `source` play, home first.
    pub fn with_rng<S: RosterSource + ?Sized>(source: &S, config: SimConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let mut records = source.team_records()?.into_iter();
        let (home, away) = match (records.next(), records.next()) {
            (Some(home), Some(away)) => (Team::from_record(home), Team::from_record(away)),
            (Some(_), None) => return Err(SimError::MissingTeams { found: 1 }),
            _ => return Err(SimError::MissingTeams { found: 0 }),
        };
        home.validate()?;
        away.validate()?;
        Ok(Self { state: GameState::new(home, away), config, rng })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Coin toss, two halves, final box score.
    pub fn play_game(&mut self) -> Result<BoxScore> {
        for side in [TeamSide::Home, TeamSide::Away] {
            let team = self.state.team_mut(side);
            apply_baseline_fatigue(&mut self.rng, team);
            team.apply_fatigue_penalties(&self.config.fatigue);
        }

        let toss_winner = if self.rng.gen_bool(0.5) { TeamSide::Home } else { TeamSide::Away };
        let first_receiver = if roll(&mut self.rng, self.config.game.receive_probability) {
            toss_winner
        } else {
            toss_winner.other()
        };
        log::info!(
            "{} wins the toss, {} receives",
            self.state.team(toss_winner).name,
            self.state.team(first_receiver).name
        );

        self.play_half(1, first_receiver)?;
        self.play_half(2, first_receiver.other())?;

        let box_score = self.state.box_score();
        log::info!(
            "Final: {} {} - {} {}",
            box_score.home.name,
            box_score.home.score,
            box_score.away.name,
            box_score.away.score
        );
        Ok(box_score)
    }

    /// One half starting with a kickoff to `receiver`.
    pub fn play_half(&mut self, half: u8, receiver: TeamSide) -> Result<()> {
        self.state.half = half;
        self.state.seconds_remaining = self.config.tempo.half_seconds;
        log::info!("Half {} kicks off ({}s)", half, self.state.seconds_remaining);

        let mut yardline = self.kick_off(receiver.other())?;
        let mut offense = receiver;

        while self.state.seconds_remaining > 0 {
            self.state.possession = offense;
            let seconds = self.state.seconds_remaining;
            let (attack, defend) = self.state.matchup_mut(offense);
            let drive = sim_drive(&mut self.rng, &self.config, attack, defend, yardline, seconds)?;
            self.state.seconds_remaining = drive.seconds_remaining;

            let result = drive.result;
            let end_yardline = drive.end_yardline;
            self.state.drives.push(DriveLog { half, offense, summary: drive });

            match result {
                DriveResult::Touchdown => {
                    self.state.add_points(offense, 6);
                    let team = self.state.team_mut(offense);
                    let name = team.name.clone();
                    let kicker = team
                        .kicker_mut()
                        .ok_or(SimError::IncompleteRoster { team: name, position: Position::K })?;
                    if attempt_extra_point(&mut self.rng, kicker) {
                        self.state.add_points(offense, 1);
                    }
                    yardline = self.kick_off(offense)?;
                }
                DriveResult::FieldGoal => {
                    self.state.add_points(offense, 3);
                    yardline = self.kick_off(offense)?;
                }
                // a punt's end yardline is already the final spot of the kick
                DriveResult::Punt
                | DriveResult::MissedFieldGoal
                | DriveResult::Turnover
                | DriveResult::TurnoverOnDowns => {
                    yardline = flip_field(end_yardline);
                }
                DriveResult::EndOfHalf => break,
            }
            offense = offense.other();
        }

        log::info!(
            "End of half {}: {} {} - {} {}",
            half,
            self.state.home.name,
            self.state.score_of(TeamSide::Home),
            self.state.away.name,
            self.state.score_of(TeamSide::Away)
        );
        Ok(())
    }

    /// Kick to the other team; returns their starting yardline.
    fn kick_off(&mut self, kicking: TeamSide) -> Result<f64> {
        let team = self.state.team(kicking);
        let kicker = team.kicker().ok_or_else(|| SimError::IncompleteRoster {
            team: team.name.clone(),
            position: Position::K,
        })?;
        let kick = kickoff(&mut self.rng, &self.config.tempo, kicker);
        self.state.seconds_remaining -= kick.elapsed;
        Ok(kick.start_yardline)
    }
}

/// The other team's starting yardline for a ball left at `yardline`.
fn flip_field(yardline: f64) -> f64 {
    (100.0 - yardline).clamp(1.0, 99.0)
}

/// Seeded game with default tuning.
pub fn simulate_game<S: RosterSource + ?Sized>(source: &S, seed: u64) -> Result<BoxScore> {
    GameSimulator::new(source, SimConfig::default(), seed)?.play_game()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::play::PlayOutcome;
    use crate::models::{LeagueRecord, StatKey};
    use crate::test_fixtures::{average_league, average_team_record};

    #[test]
    fn test_same_seed_same_game() {
        let league = average_league();
        let a = simulate_game(&league, 7).unwrap();
        let b = simulate_game(&league, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.home.name, "Hawks");
        assert_eq!(a.away.name, "Owls");
    }

    #[test]
    fn test_no_stat_leakage() {
        let league = average_league();
        let mut sim = GameSimulator::new(&league, SimConfig::default(), 11).unwrap();
        let box_score = sim.play_game().unwrap();
        let state = sim.into_state();

        for (side, row) in [(TeamSide::Home, &box_score.home), (TeamSide::Away, &box_score.away)] {
            let mut rushed = 0.0;
            let mut passed = 0.0;
            for log in state.drives.iter().filter(|d| d.offense == side) {
                for record in &log.summary.plays {
                    match record.play.outcome {
                        PlayOutcome::Run => rushed += record.play.yards,
                        PlayOutcome::Completion | PlayOutcome::Checkdown => passed += record.play.yards,
                        _ => {}
                    }
                }
            }
            assert!((row.stat(StatKey::RushYards) - rushed).abs() < 1e-6);
            assert!((row.stat(StatKey::PassYards) - passed).abs() < 1e-6);
            assert!((row.stat(StatKey::ReceivingYards) - passed).abs() < 1e-6);

            let individual: f64 =
                state.team(side).all_players().map(|p| p.stats.get(StatKey::RushYards)).sum();
            assert!((row.stat(StatKey::RushYards) - individual).abs() < 1e-6);
        }
    }

    #[test]
    fn test_score_matches_scoring_drives() {
        let league = average_league();
        for seed in 0..5 {
            let mut sim = GameSimulator::new(&league, SimConfig::default(), seed).unwrap();
            let box_score = sim.play_game().unwrap();
            let state = sim.state();
            for (side, row) in [(TeamSide::Home, &box_score.home), (TeamSide::Away, &box_score.away)] {
                let count = |result: DriveResult| {
                    state.drives.iter().filter(|d| d.offense == side && d.summary.result == result).count() as u32
                };
                let touchdowns = count(DriveResult::Touchdown);
                let field_goals = count(DriveResult::FieldGoal);
                let pats = row.stat(StatKey::PatMade) as u32;
                assert_eq!(row.score, 6 * touchdowns + pats + 3 * field_goals);
                assert_eq!(row.stat(StatKey::PatAttempts) as u32, touchdowns);
                assert_eq!(row.stat(StatKey::FieldGoalsMade) as u32, field_goals);
            }
        }
    }

    #[test]
    fn test_possession_alternates_and_halves_switch_receiver() {
        let league = average_league();
        let mut sim = GameSimulator::new(&league, SimConfig::default(), 3).unwrap();
        sim.play_game().unwrap();
        let drives = &sim.state().drives;

        for pair in drives.windows(2).filter(|w| w[0].half == w[1].half) {
            assert_ne!(pair[0].offense, pair[1].offense);
        }
        let first_half = drives.iter().find(|d| d.half == 1).unwrap();
        let second_half = drives.iter().find(|d| d.half == 2).unwrap();
        assert_ne!(first_half.offense, second_half.offense);
        assert!(drives.iter().all(|d| (1.0..=99.0).contains(&d.summary.start_yardline)));
    }

    #[test]
    fn test_one_team_is_not_a_game() {
        let league = LeagueRecord { teams: vec![average_team_record("Hawks")] };
        let err = GameSimulator::new(&league, SimConfig::default(), 1).err().unwrap();
        assert!(matches!(err, SimError::MissingTeams { found: 1 }));
        assert!(err.is_roster_error());
    }

    #[test]
    fn test_missing_kicker_rejected_up_front() {
        let mut away = average_team_record("Owls");
        away.offense.retain(|p| p.position != Position::K);
        let teams = vec![average_team_record("Hawks"), away];
        let err = GameSimulator::new(teams.as_slice(), SimConfig::default(), 1).err().unwrap();
        assert!(matches!(err, SimError::IncompleteRoster { position: Position::K, .. }));
    }

    #[test]
    fn test_box_score_json_round_trip() {
        let score = simulate_game(&average_league(), 99).unwrap();
        let json = score.to_json().unwrap();
        assert!(json.contains("\"rush_yards\""));
        let back: BoxScore = serde_json::from_str(&json).unwrap();
        for (a, b) in [(&back.home, &score.home), (&back.away, &score.away)] {
            assert_eq!((&a.name, a.score, a.drives), (&b.name, b.score, b.drives));
            for key in StatKey::BOX_SCORE {
                assert!((a.stat(key) - b.stat(key)).abs() < 1e-9);
            }
        }
    }
}
