//! Reproduction operators for automata.
//!
//! # Crossover
//!
//! [`crossover`] cuts the transition table at a random row and column and
//! takes the lower-right rectangle from the second parent; accept flags are
//! cut at a single point; the start state is a coin flip.
//!
//! # Mutation
//!
//! Mutation is gated twice. [`gated_mutation`] decides per individual, with
//! the population-level `mutation_rate`, whether to mutate at all; the
//! chosen individual then changes each gene independently with
//! `gene_mutation_rate` (see [`Automaton::mutate`]).

use crate::dfa::Automaton;
use rand::Rng;

/// Recombines two parents into one unevaluated child.
///
/// With row cut `r ∈ [0, states)` and column cut `c ∈ [0, alphabet)`, cell
/// `(y, x)` comes from `second` iff `y >= r && x >= c`, otherwise from
/// `first`. With accept cut `k ∈ [0, states)`, flag `i` comes from `second`
/// iff `i >= k`. The start state is taken from either parent with equal
/// probability.
///
/// # Complexity
/// O(states × alphabet)
///
/// # Panics
/// Panics if the parents differ in state count or alphabet size.
pub fn crossover<R: Rng>(first: &Automaton, second: &Automaton, rng: &mut R) -> Automaton {
    let states = first.states();
    let alphabet = first.alphabet_size();
    assert_eq!(states, second.states(), "parents must have equal state count");
    assert_eq!(
        alphabet,
        second.alphabet_size(),
        "parents must have equal alphabet size"
    );

    let row_cut = rng.random_range(0..states);
    let col_cut = rng.random_range(0..alphabet);

    let transition = first
        .transitions()
        .iter()
        .zip(second.transitions())
        .enumerate()
        .map(|(i, (&a, &b))| {
            let (y, x) = (i / alphabet, i % alphabet);
            if y >= row_cut && x >= col_cut {
                b
            } else {
                a
            }
        })
        .collect();

    let accept_cut = rng.random_range(0..states);
    let accept = first
        .accept_states()
        .iter()
        .zip(second.accept_states())
        .enumerate()
        .map(|(i, (&a, &b))| if i >= accept_cut { b } else { a })
        .collect();

    let start_state = if rng.random_bool(0.5) {
        first.start_state()
    } else {
        second.start_state()
    };

    Automaton::from_parts(states, alphabet, transition, accept, start_state)
}

/// Mutates `individual` with probability `mutation_rate`.
///
/// Returns whether mutation happened.
///
/// # Panics
/// Panics if either rate is outside `[0, 1]`.
pub fn gated_mutation<R: Rng>(
    individual: &mut Automaton,
    mutation_rate: f64,
    gene_mutation_rate: f64,
    rng: &mut R,
) -> bool {
    if rng.random_bool(mutation_rate) {
        individual.mutate(gene_mutation_rate, rng);
        true
    } else {
        false
    }
}
