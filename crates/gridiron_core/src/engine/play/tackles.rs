//! Tackle credit after a play is over.

use crate::engine::sampling::{pick_distinct_weighted, pick_weighted, roll};
use crate::models::{rating, Player, Position, StatKey};
use rand::Rng;

const ASSIST_CHANCE: f64 = 0.35;
/// Corners admitted to a single tackle pool
const MAX_CORNERS: usize = 3;

/// Positional weight by how far the ball carrier got.
fn profile(position: Position, yards: f64) -> f64 {
    use Position::*;
    if yards <= 2.0 {
        match position {
            DL => 0.35,
            ROLB => 0.20,
            LOLB => 0.15,
            MLB => 0.20,
            S => 0.10,
            _ => 0.0,
        }
    } else if yards <= 7.0 {
        match position {
            ROLB => 0.25,
            LOLB => 0.20,
            MLB => 0.25,
            S => 0.20,
            DL => 0.10,
            _ => 0.0,
        }
    } else {
        match position {
            S => 0.40,
            CB => 0.40,
            ROLB => 0.08,
            LOLB => 0.06,
            MLB => 0.06,
            _ => 0.0,
        }
    }
}

fn tackle_skill(player: &Player) -> f64 {
    (rating(player.attrs().tackling) + player.intelligence()) / 2.0
}

/// Credit one tackler, or two on an assisted tackle. Returns the indices
/// credited.
pub fn assign_tackles(rng: &mut impl Rng, defense: &mut [Player], yards: f64) -> Vec<usize> {
    let mut corners = 0;
    let mut pool = Vec::new();
    for (i, p) in defense.iter().enumerate() {
        if !p.in_game || profile(p.position, yards) <= 0.0 {
            continue;
        }
        if p.position == Position::CB {
            if corners == MAX_CORNERS {
                continue;
            }
            corners += 1;
        }
        pool.push(i);
    }

    let weight = |i: usize| profile(defense[i].position, yards) * tackle_skill(&defense[i]);
    let tacklers = if pool.is_empty() {
        log::warn!("No eligible tacklers for a {:.1} yard play, widening to the whole defense", yards);
        let everyone: Vec<usize> =
            defense.iter().enumerate().filter(|(_, p)| p.in_game).map(|(i, _)| i).collect();
        let amount = if roll(rng, ASSIST_CHANCE) { 2 } else { 1 };
        pick_distinct_weighted(rng, &everyone, amount, |i| tackle_skill(&defense[i]))
    } else if roll(rng, ASSIST_CHANCE) {
        pick_distinct_weighted(rng, &pool, 2, weight)
    } else {
        pick_weighted(rng, &pool, weight).into_iter().collect()
    };

    for &i in &tacklers {
        defense[i].stats.incr(StatKey::Tackles);
    }
    tacklers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{average_team, seeded_rng};

    #[test]
    fn test_short_gain_never_credits_corners() {
        let mut rng = seeded_rng(21);
        let mut team = average_team("Owls");
        for _ in 0..500 {
            for i in assign_tackles(&mut rng, &mut team.defense, 1.0) {
                assert_ne!(team.defense[i].position, Position::CB);
            }
        }
    }

    #[test]
    fn test_long_gain_goes_to_secondary_mostly() {
        let mut rng = seeded_rng(22);
        let mut team = average_team("Owls");
        for _ in 0..2_000 {
            assign_tackles(&mut rng, &mut team.defense, 25.0);
        }
        let secondary: f64 = team
            .defense
            .iter()
            .filter(|p| p.position.is_secondary())
            .map(|p| p.stats.get(StatKey::Tackles))
            .sum();
        let total: f64 = team.defense.iter().map(|p| p.stats.get(StatKey::Tackles)).sum();
        assert!(secondary / total > 0.75);
        assert!(team
            .defense
            .iter()
            .filter(|p| p.position == Position::DL)
            .all(|p| p.stats.get(StatKey::Tackles) == 0.0));
    }

    #[test]
    fn test_assisted_tackles_are_distinct() {
        let mut rng = seeded_rng(23);
        let mut team = average_team("Owls");
        let mut assisted = 0;
        for _ in 0..2_000 {
            let tacklers = assign_tackles(&mut rng, &mut team.defense, 5.0);
            assert!(!tacklers.is_empty() && tacklers.len() <= 2);
            if tacklers.len() == 2 {
                assisted += 1;
                assert_ne!(tacklers[0], tacklers[1]);
            }
        }
        let share = f64::from(assisted) / 2_000.0;
        assert!((0.30..0.40).contains(&share), "assisted share {share}");
    }

    #[test]
    fn test_corner_only_defense_falls_back() {
        let mut rng = seeded_rng(24);
        let mut team = average_team("Owls");
        for p in team.defense.iter_mut() {
            p.in_game = p.position == Position::CB;
        }
        let tacklers = assign_tackles(&mut rng, &mut team.defense, 1.0);
        assert!(!tacklers.is_empty());
        assert!(tacklers.iter().all(|&i| team.defense[i].position == Position::CB));
    }
}
