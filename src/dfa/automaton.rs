//! The evolvable DFA candidate.

use std::fmt;

use rand::Rng;

use super::fitness::{self, Example};
use crate::error::EvolutionError;
use crate::ga::{EvolutionConfig, Individual};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State in which execution begins, independent of [`Automaton::start_state`].
pub const INITIAL_STATE: usize = 0;

/// A deterministic finite automaton with a cached fitness score.
///
/// The genes are the transition table (one cell per `(state, symbol)` pair)
/// and the accept flags (one per state). `start_state` is carried along and
/// inherited by crossover, but [`run`](Self::run) always begins at
/// [`INITIAL_STATE`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Automaton {
    states: usize,
    alphabet_size: usize,
    /// Row-major `states × alphabet_size` table.
    transition: Vec<usize>,
    accept: Vec<bool>,
    start_state: usize,
    fitness: Option<f64>,
}

impl Automaton {
    /// Creates a random automaton shaped by `config`.
    ///
    /// Every transition is drawn uniformly from the states, each state is
    /// accepting with probability `config.accept_rate`, and the start state
    /// is uniform.
    ///
    /// # Panics
    /// Panics if `config.state_count` is zero or `accept_rate` is outside
    /// `[0, 1]` (call [`EvolutionConfig::validate`] first).
    pub fn create_random<R: Rng>(config: &EvolutionConfig, rng: &mut R) -> Self {
        let states = config.state_count;
        let alphabet_size = config.alphabet_size;

        let transition = (0..states * alphabet_size)
            .map(|_| rng.random_range(0..states))
            .collect();
        let accept = (0..states)
            .map(|_| rng.random_bool(config.accept_rate))
            .collect();
        let start_state = rng.random_range(0..states);

        Self {
            states,
            alphabet_size,
            transition,
            accept,
            start_state,
            fitness: None,
        }
    }

    /// Builds an automaton from explicit genes.
    ///
    /// `transition` is row-major: the successor of state `s` on symbol `x`
    /// is `transition[s * alphabet_size + x]`. Only range checks are
    /// performed.
    ///
    /// ```
    /// use genetic_dfa::dfa::Automaton;
    ///
    /// // Accepts strings with an even number of 1s.
    /// let dfa = Automaton::from_genes(2, 2, vec![0, 1, 1, 0], vec![true, false], 0).unwrap();
    /// assert!(dfa.run("1001"));
    /// assert!(!dfa.run("10"));
    /// ```
    pub fn from_genes(
        states: usize,
        alphabet_size: usize,
        transition: Vec<usize>,
        accept: Vec<bool>,
        start_state: usize,
    ) -> Result<Self, EvolutionError> {
        if states == 0 || alphabet_size == 0 {
            return Err(EvolutionError::InvalidGenes(
                "automaton needs at least one state and one symbol".into(),
            ));
        }
        if transition.len() != states * alphabet_size {
            return Err(EvolutionError::InvalidGenes(format!(
                "transition table has {} cells, expected {}",
                transition.len(),
                states * alphabet_size
            )));
        }
        if let Some(&bad) = transition.iter().find(|&&to| to >= states) {
            return Err(EvolutionError::InvalidGenes(format!(
                "transition target {bad} out of range for {states} states"
            )));
        }
        if accept.len() != states {
            return Err(EvolutionError::InvalidGenes(format!(
                "{} accept flags for {states} states",
                accept.len()
            )));
        }
        if start_state >= states {
            return Err(EvolutionError::InvalidGenes(format!(
                "start state {start_state} out of range for {states} states"
            )));
        }

        Ok(Self {
            states,
            alphabet_size,
            transition,
            accept,
            start_state,
            fitness: None,
        })
    }

    /// Crossover builds children from parents already known to be valid.
    pub(crate) fn from_parts(
        states: usize,
        alphabet_size: usize,
        transition: Vec<usize>,
        accept: Vec<bool>,
        start_state: usize,
    ) -> Self {
        debug_assert_eq!(transition.len(), states * alphabet_size);
        debug_assert_eq!(accept.len(), states);
        Self {
            states,
            alphabet_size,
            transition,
            accept,
            start_state,
            fitness: None,
        }
    }

    /// Runs the automaton and reports whether it accepts `input`.
    ///
    /// Each character is read as its numeric value (`'0'` is 0, `'1'` is 1,
    /// `'a'` is 10, ...). Execution starts at [`INITIAL_STATE`].
    ///
    /// # Panics
    /// Panics if a character is not alphanumeric or its value is not below
    /// the alphabet size. Feeding such input is a caller bug.
    pub fn run(&self, input: &str) -> bool {
        let mut state = INITIAL_STATE;
        for c in input.chars() {
            let symbol = match symbol_of(c) {
                Some(s) if s < self.alphabet_size => s,
                _ => panic!(
                    "symbol {c:?} in input {input:?} is outside alphabet of size {}",
                    self.alphabet_size
                ),
            };
            state = self.transition[state * self.alphabet_size + symbol];
        }
        self.accept[state]
    }

    /// Scores the automaton against `examples`, caches and returns the
    /// fraction classified correctly.
    pub fn evaluate(&mut self, examples: &[Example]) -> f64 {
        let score = fitness::evaluate(self, examples);
        self.set_fitness(score);
        score
    }

    /// Perturbs the genes in place.
    ///
    /// Each transition cell is redrawn uniformly with probability
    /// `gene_mutation_rate`, and each accept flag is inverted with the same
    /// probability. The start state never mutates. Any cached fitness is
    /// discarded.
    ///
    /// # Panics
    /// Panics if `gene_mutation_rate` is outside `[0, 1]`.
    pub fn mutate<R: Rng>(&mut self, gene_mutation_rate: f64, rng: &mut R) {
        for cell in &mut self.transition {
            if rng.random_bool(gene_mutation_rate) {
                *cell = rng.random_range(0..self.states);
            }
        }
        for flag in &mut self.accept {
            if rng.random_bool(gene_mutation_rate) {
                *flag = !*flag;
            }
        }
        self.fitness = None;
    }

    /// Number of states.
    pub fn states(&self) -> usize {
        self.states
    }

    /// Number of input symbols.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Successor of `state` on `symbol`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn transition(&self, state: usize, symbol: usize) -> usize {
        assert!(symbol < self.alphabet_size, "symbol {symbol} out of range");
        self.transition[state * self.alphabet_size + symbol]
    }

    /// The raw row-major transition table.
    pub fn transitions(&self) -> &[usize] {
        &self.transition
    }

    /// Accept flag of every state.
    pub fn accept_states(&self) -> &[bool] {
        &self.accept
    }

    /// Whether `state` is accepting.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accept[state]
    }

    /// The evolved start state (not used by [`run`](Self::run)).
    pub fn start_state(&self) -> usize {
        self.start_state
    }

    /// Whether the cached fitness belongs to the current genes.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Every edge as `(from, symbol, to)`, ordered by state then symbol.
    ///
    /// Intended for drawing the automaton as a labeled graph.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.transition
            .iter()
            .enumerate()
            .map(move |(i, &to)| (i / self.alphabet_size, i % self.alphabet_size, to))
    }
}

impl Individual for Automaton {
    /// Cached score, `0.0` when the automaton has not been evaluated.
    fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DFA(start={}", self.start_state)?;
        for state in 0..self.states {
            let row = &self.transition[state * self.alphabet_size..(state + 1) * self.alphabet_size];
            let marker = if self.accept[state] { "*" } else { "" };
            write!(f, " q{state}{marker}->{row:?}")?;
        }
        write!(f, ")")
    }
}

/// Numeric value of an input character.
pub(crate) fn symbol_of(c: char) -> Option<usize> {
    c.to_digit(36).map(|d| d as usize)
}
