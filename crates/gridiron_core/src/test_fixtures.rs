//! Shared rosters for unit tests. Every rating is league average (50).

use crate::models::{LeagueRecord, PlayerRecord, Position, Team, TeamRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Average record with the skills that apply to `position` filled in.
pub fn average_record(name: &str, position: Position, in_game: bool) -> PlayerRecord {
    let mut r = PlayerRecord::new(name, position);
    r.in_game = in_game;
    let avg = Some(50);
    match position {
        Position::QB => {
            r.passing = avg;
            r.decision_making = avg;
        }
        Position::RB => {
            r.elusiveness = avg;
            r.vision = avg;
            r.hands = avg;
            r.route_running = avg;
        }
        Position::WR => {
            r.hands = avg;
            r.route_running = avg;
        }
        Position::TE => {
            r.hands = avg;
            r.route_running = avg;
            r.run_blocking = avg;
            r.pass_blocking = avg;
        }
        Position::OL => {
            r.run_blocking = avg;
            r.pass_blocking = avg;
        }
        Position::K => {
            r.kick_power = avg;
            r.kick_accuracy = avg;
        }
        Position::P => {
            r.punt_power = avg;
            r.punt_accuracy = avg;
        }
        Position::DL => {
            r.rushing = avg;
            r.tackling = avg;
        }
        Position::LOLB | Position::MLB | Position::ROLB => {
            r.rushing = avg;
            r.tackling = avg;
            r.coverage = avg;
        }
        Position::CB | Position::S => {
            r.tackling = avg;
            r.coverage = avg;
        }
    }
    r
}

/// Eleven starters per side plus a bench at every rotating position.
pub fn average_team_record(name: &str) -> TeamRecord {
    let offense_layout: [(Position, usize, usize); 7] = [
        (Position::QB, 1, 1),
        (Position::RB, 1, 1),
        (Position::WR, 3, 2),
        (Position::TE, 1, 1),
        (Position::OL, 5, 1),
        (Position::K, 0, 1),
        (Position::P, 0, 1),
    ];
    let defense_layout: [(Position, usize, usize); 6] = [
        (Position::DL, 4, 2),
        (Position::LOLB, 1, 1),
        (Position::MLB, 1, 1),
        (Position::ROLB, 1, 1),
        (Position::CB, 2, 2),
        (Position::S, 2, 1),
    ];

    let build = |layout: &[(Position, usize, usize)]| {
        let mut players = Vec::new();
        for &(position, starters, bench) in layout {
            for i in 0..starters + bench {
                let player_name = format!("{name} {position}{}", i + 1);
                players.push(average_record(&player_name, position, i < starters));
            }
        }
        players
    };

    TeamRecord {
        team_name: name.to_string(),
        offense: build(&offense_layout),
        defense: build(&defense_layout),
    }
}

pub fn average_team(name: &str) -> Team {
    Team::from_record(average_team_record(name))
}

pub fn average_league() -> LeagueRecord {
    LeagueRecord { teams: vec![average_team_record("Hawks"), average_team_record("Owls")] }
}
