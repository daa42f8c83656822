//! Fatigue-driven substitutions.
//!
//! Swaps are one-for-one within a position, so the number of players on the
//! field per position never changes.

use crate::models::{Player, Position};
use serde::Serialize;
use std::cmp::Ordering;

/// One completed swap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    pub position: Position,
    pub out: String,
    pub replacement: String,
    pub out_fatigue: f32,
}

/// Distinct positions on a roster, in position order.
pub fn positions_present(players: &[Player]) -> Vec<Position> {
    let mut positions: Vec<Position> = players.iter().map(|p| p.position).collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Bench every on-field player at `positions` whose fatigue exceeds
/// `threshold`, bringing in the freshest eligible backup.
///
/// Backups must themselves be at or under the threshold. Ties on fatigue go
/// to the more productive player. When a position runs out of backups the
/// remaining tired players stay on the field.
pub fn substitute_fatigued(
    players: &mut [Player],
    positions: &[Position],
    threshold: f32,
) -> Vec<Substitution> {
    let mut swaps = Vec::new();

    for &position in positions {
        let mut tired: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_game && p.position == position && p.fatigue > threshold)
            .map(|(i, _)| i)
            .collect();
        if tired.is_empty() {
            continue;
        }

        let mut bench: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.in_game && p.position == position && p.fatigue <= threshold)
            .map(|(i, _)| i)
            .collect();
        if bench.is_empty() {
            log::trace!("No rested {} available, {} stay on", position, tired.len());
            continue;
        }

        // most tired leave first
        tired.sort_by(|&a, &b| {
            players[b].fatigue.partial_cmp(&players[a].fatigue).unwrap_or(Ordering::Equal)
        });
        bench.sort_by(|&a, &b| {
            players[a]
                .fatigue
                .partial_cmp(&players[b].fatigue)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    let (pa, pb) = (players[a].stats.production(), players[b].stats.production());
                    pb.partial_cmp(&pa).unwrap_or(Ordering::Equal)
                })
        });

        for (&out_idx, &in_idx) in tired.iter().zip(bench.iter()) {
            players[out_idx].in_game = false;
            players[in_idx].in_game = true;
            swaps.push(Substitution {
                position,
                out: players[out_idx].name.clone(),
                replacement: players[in_idx].name.clone(),
                out_fatigue: players[out_idx].fatigue,
            });
        }
    }

    swaps
}
