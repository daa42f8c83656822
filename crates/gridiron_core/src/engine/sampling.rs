//! Random draws shared by every resolver.
//!
//! Candidates are passed around as roster indices so the caller can mutate the
//! chosen players afterwards without fighting the borrow checker.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

/// Bernoulli trial, `p` outside [0, 1] is saturated.
pub fn roll(rng: &mut impl Rng, p: f64) -> bool {
    rng.gen::<f64>() < p
}

pub fn gauss(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Inclusive integer range given as a config tuple.
pub fn between(rng: &mut impl Rng, (lo, hi): (i32, i32)) -> i32 {
    rng.gen_range(lo..=hi)
}

/// One weighted pick. Non-positive total weight falls back to a uniform pick.
pub fn pick_weighted<F>(rng: &mut impl Rng, candidates: &[usize], weight: F) -> Option<usize>
where
    F: Fn(usize) -> f64,
{
    match candidates.choose_weighted(rng, |&i| weight(i).max(0.0)) {
        Ok(&i) => Some(i),
        Err(_) => candidates.choose(rng).copied(),
    }
}

/// Up to `amount` distinct picks, weighted, without replacement.
///
/// Uses rand's exponential-key sampler, so small pools never loop and no
/// candidate appears twice.
pub fn pick_distinct_weighted<F>(
    rng: &mut impl Rng,
    candidates: &[usize],
    amount: usize,
    weight: F,
) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    let amount = amount.min(candidates.len());
    // zero weights would still be drawn once the positive ones run out
    let floor = f64::MIN_POSITIVE;
    match candidates.choose_multiple_weighted(rng, amount, |&i| weight(i).max(floor)) {
        Ok(picks) => picks.copied().collect(),
        Err(_) => candidates.choose_multiple(rng, amount).copied().collect(),
    }
}

/// Weighted random permutation: heavier candidates tend to come first.
pub fn weighted_order<F>(rng: &mut impl Rng, candidates: &[usize], weight: F) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    pick_distinct_weighted(rng, candidates, candidates.len(), weight)
}
