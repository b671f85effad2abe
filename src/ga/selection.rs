//! Population ranking and parent selection.
//!
//! Fitness is **maximized**: [`rank`] puts the fittest individual first,
//! and [`roulette`] favors individuals in proportion to their fitness share.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;
use tracing::trace;

/// Sorts `population` by fitness, best first.
///
/// The sort is stable, so equal-fitness individuals keep their relative
/// order. The comparator uses [`f64::total_cmp`] and draws no randomness.
pub fn rank<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Draws `u ~ U[0, 1)` and returns the index of the first individual whose
/// cumulative fitness share reaches `u`.
///
/// Individuals with a zero share are skipped. This departs from the plain
/// "first cumulative share >= u" rule only when `u == 0`, where the plain
/// rule would return a leading zero-fitness individual.
///
/// If the total fitness is zero (or not finite) the wheel is degenerate and
/// an index is drawn uniformly instead. If rounding leaves the cumulative
/// share just short of `u`, the last individual with non-zero fitness is
/// returned. The result is always a valid index.
///
/// # Panics
/// Panics if `population` is empty.
///
/// # Complexity
/// O(n) per selection
pub fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    let total: f64 = population.iter().map(I::fitness).sum();
    if !(total.is_finite() && total > 0.0) {
        trace!(total, "degenerate roulette wheel, selecting uniformly");
        return rng.random_range(0..n);
    }

    let value: f64 = rng.random();
    let mut threshold = 0.0;
    for (i, ind) in population.iter().enumerate() {
        let share = ind.fitness() / total;
        threshold += share;
        if share > 0.0 && value <= threshold {
            return i;
        }
    }

    // floating-point fallback
    population
        .iter()
        .rposition(|ind| ind.fitness() > 0.0)
        .unwrap_or(n - 1)
}
