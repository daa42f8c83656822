//! Fatigue System
//!
//! Exertion accrues on every on-field player each snap, skill players faster
//! than linemen and low-endurance players faster than high. Play resolvers
//! add a play-specific charge afterwards (ball carrier and target pay per
//! yard). Bench players recover between snaps.
//!
//! Fatigue only ever touches the `fatigue` scalar and the derived effective
//! ratings; base ratings are never written.

use super::sampling::roll;
use super::substitution;
use crate::config::FatigueConfig;
use crate::models::{Player, Position, Team};
use rand::Rng;

fn endurance_gap(player: &Player) -> f32 {
    100.0 - f32::from(player.base().endurance)
}

/// Pre-game fatigue. Low-endurance players sometimes arrive not fully rested.
pub fn apply_baseline_fatigue(rng: &mut impl Rng, team: &mut Team) {
    for player in team.all_players_mut() {
        let base_chance = endurance_gap(player) / 10.0;
        if roll(rng, f64::from(base_chance) / 100.0) {
            let max_fatigue = (base_chance.round() as i32).max(1);
            player.fatigue = rng.gen_range(1..=max_fatigue) as f32;
        } else {
            player.fatigue = 0.0;
        }
    }
}

/// Per-snap exertion for everyone on the field.
pub fn apply_general_exertion(players: &mut [Player], config: &FatigueConfig) {
    for player in players.iter_mut().filter(|p| p.in_game) {
        let base = if player.position.is_high_exertion() {
            config.skill_exertion
        } else {
            config.line_exertion
        };
        let endurance_factor = endurance_gap(player) / 100.0;
        player.add_fatigue(base + endurance_factor * base);
    }
}

/// Extra charge after a run. `carrier` pays per yard gained.
pub fn apply_run_exertion(
    offense: &mut [Player],
    defense: &mut [Player],
    carrier: Option<usize>,
    yards: f64,
    config: &FatigueConfig,
) {
    if !config.enabled {
        return;
    }
    for (idx, player) in offense.iter_mut().enumerate() {
        if !player.in_game {
            continue;
        }
        let gap = endurance_gap(player);
        let base = 1.0 + gap / 80.0;
        // a scrambling QB is charged as the carrier
        let fatigue = if carrier == Some(idx) {
            let effort = 1.0 + yards as f32 / config.run_yards_per_effort;
            base + effort * (1.0 + gap / 100.0)
        } else if Position::OFFENSIVE_SKILL.contains(&player.position) {
            base * config.run_decoy_share
        } else {
            continue;
        };
        player.add_fatigue(fatigue.round());
    }

    for player in defense.iter_mut().filter(|p| p.in_game) {
        if player.position.is_front_seven() || player.position == Position::S {
            let fatigue = 0.6 + endurance_gap(player) / 110.0;
            player.add_fatigue(round1(fatigue));
        }
    }
}

/// Extra charge after a pass. `target` pays per yard gained.
pub fn apply_pass_exertion(
    offense: &mut [Player],
    defense: &mut [Player],
    target: Option<usize>,
    yards: f64,
    config: &FatigueConfig,
) {
    if !config.enabled {
        return;
    }
    for (idx, player) in offense.iter_mut().enumerate() {
        if !player.in_game || !Position::OFFENSIVE_SKILL.contains(&player.position) {
            continue;
        }
        let gap = endurance_gap(player);
        let base = 1.0 + gap / 80.0;
        let fatigue = if target == Some(idx) {
            let effort = 1.0 + yards as f32 / config.catch_yards_per_effort;
            base + effort * (1.0 + gap / 100.0)
        } else {
            base
        };
        player.add_fatigue(fatigue.round());
    }

    for player in defense.iter_mut().filter(|p| p.in_game) {
        if player.position.is_secondary() || player.position.is_linebacker() {
            let fatigue = 0.5 + endurance_gap(player) / 120.0;
            player.add_fatigue(round1(fatigue));
        }
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Everything that happens to both teams between snaps: exertion, attribute
/// penalties, substitutions, bench recovery. Returns the number of swaps.
pub fn prepare_snap(offense: &mut Team, defense: &mut Team, config: &FatigueConfig) -> usize {
    if !config.enabled {
        return 0;
    }

    apply_general_exertion(&mut offense.offense, config);
    apply_general_exertion(&mut defense.defense, config);

    offense.apply_fatigue_penalties(config);
    defense.apply_fatigue_penalties(config);

    let mut swaps = substitution::substitute_fatigued(
        &mut offense.offense,
        &Position::OFFENSIVE_SKILL,
        config.substitution_threshold,
    );
    let defensive_positions = substitution::positions_present(&defense.defense);
    swaps.extend(substitution::substitute_fatigued(
        &mut defense.defense,
        &defensive_positions,
        config.substitution_threshold,
    ));
    for swap in &swaps {
        log::debug!(
            "Substitution {} ({}): {} out at fatigue {:.1}, {} in",
            swap.position,
            swap.position.side(),
            swap.out,
            swap.out_fatigue,
            swap.replacement
        );
    }

    offense.recover_bench_players(config);
    defense.recover_bench_players(config);

    swaps.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use crate::test_fixtures::{average_team, seeded_rng};

    fn idx_of(players: &[Player], position: Position, in_game: bool) -> usize {
        players.iter().position(|p| p.position == position && p.in_game == in_game).unwrap()
    }

    #[test]
    fn test_general_exertion_by_role() {
        let cfg = FatigueConfig::default();
        let mut team = average_team("Hawks");
        apply_general_exertion(&mut team.offense, &cfg);

        let wr = idx_of(&team.offense, Position::WR, true);
        let ol = idx_of(&team.offense, Position::OL, true);
        let bench_wr = idx_of(&team.offense, Position::WR, false);
        // 1.8 + 0.5 * 1.8
        assert!((team.offense[wr].fatigue - 2.7).abs() < 1e-4);
        // 0.1 + 0.5 * 0.1
        assert!((team.offense[ol].fatigue - 0.15).abs() < 1e-4);
        assert_eq!(team.offense[bench_wr].fatigue, 0.0);
    }

    #[test]
    fn test_run_exertion_charges_carrier_per_yard() {
        let cfg = FatigueConfig::default();
        let mut team = average_team("Hawks");
        let mut opp = average_team("Owls");
        let rb = idx_of(&team.offense, Position::RB, true);
        let wr = idx_of(&team.offense, Position::WR, true);

        apply_run_exertion(&mut team.offense, &mut opp.defense, Some(rb), 14.0, &cfg);
        // base 1.625 + (1 + 2) * 1.5 = 6.125 -> 6
        assert_eq!(team.offense[rb].fatigue, 6.0);
        // 1.625 * 0.75 = 1.22 -> 1
        assert_eq!(team.offense[wr].fatigue, 1.0);

        let dl = idx_of(&opp.defense, Position::DL, true);
        let cb = idx_of(&opp.defense, Position::CB, true);
        // 0.6 + 50/110 = 1.05 -> 1.1
        assert!((opp.defense[dl].fatigue - 1.1).abs() < 1e-4);
        assert_eq!(opp.defense[cb].fatigue, 0.0, "corners are not charged on runs");
    }

    #[test]
    fn test_pass_exertion_charges_coverage() {
        let cfg = FatigueConfig::default();
        let mut team = average_team("Hawks");
        let mut opp = average_team("Owls");
        let wr = idx_of(&team.offense, Position::WR, true);

        apply_pass_exertion(&mut team.offense, &mut opp.defense, Some(wr), 20.0, &cfg);
        // 1.625 + 3 * 1.5 = 6.125 -> 6
        assert_eq!(team.offense[wr].fatigue, 6.0);

        let cb = idx_of(&opp.defense, Position::CB, true);
        let dl = idx_of(&opp.defense, Position::DL, true);
        // 0.5 + 50/120 = 0.9167 -> 0.9
        assert!((opp.defense[cb].fatigue - 0.9).abs() < 1e-4);
        assert_eq!(opp.defense[dl].fatigue, 0.0);
    }

    #[test]
    fn test_baseline_fatigue_bounds() {
        let mut rng = seeded_rng(42);
        for _ in 0..50 {
            let mut team = average_team("Hawks");
            apply_baseline_fatigue(&mut rng, &mut team);
            // endurance 50 -> at most 5
            assert!(team.all_players().all(|p| (0.0..=5.0).contains(&p.fatigue)));
        }
    }

    #[test]
    fn test_baseline_fatigue_iron_men_stay_fresh() {
        let mut rng = seeded_rng(9);
        let mut team = average_team("Hawks");
        for p in team.all_players_mut() {
            *p = Player::new(p.name.clone(), p.position, crate::models::Attributes {
                endurance: 100,
                ..*p.base()
            })
            .with_in_game(p.in_game);
        }
        apply_baseline_fatigue(&mut rng, &mut team);
        assert!(team.all_players().all(|p| p.fatigue == 0.0));
    }

    #[test]
    fn test_prepare_snap_disabled_is_noop() {
        let cfg = crate::config::SimConfig::no_fatigue().fatigue;
        let mut a = average_team("Hawks");
        let mut b = average_team("Owls");
        assert_eq!(prepare_snap(&mut a, &mut b, &cfg), 0);
        assert!(a.all_players().all(|p| p.fatigue == 0.0));
    }

    #[test]
    fn test_prepare_snap_eventually_rotates_receivers() {
        let cfg = FatigueConfig::default();
        let mut a = average_team("Hawks");
        let mut b = average_team("Owls");
        let starters: Vec<String> = a
            .offense
            .iter()
            .filter(|p| p.in_game && p.position == Position::WR)
            .map(|p| p.name.clone())
            .collect();

        let mut swaps = 0;
        for _ in 0..30 {
            swaps += prepare_snap(&mut a, &mut b, &cfg);
        }
        assert!(swaps > 0);
        let on_field: Vec<&str> = a
            .on_field(Side::Offense)
            .filter(|p| p.position == Position::WR)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(on_field.len(), 3, "one-for-one swaps keep the count");
        assert!(on_field.iter().any(|n| !starters.iter().any(|s| s == n)));
    }
}
