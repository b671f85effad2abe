//! The epoch-driven evolution controller.
//!
//! [`Evolution`] owns the population, the training set, the fitness
//! histories and the single random source of a run. Each call to
//! [`Evolution::step`] performs one epoch:
//! evaluate → rank → record → (stop | breed → mutate → replace).

use super::config::EvolutionConfig;
use super::operators::{crossover, gated_mutation};
use super::selection::{rank, roulette};
use super::types::{EpochState, FitnessHistory, Individual};
use crate::dfa::{Automaton, TrainingSet};
use crate::error::EvolutionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A running (or finished) evolutionary search for an automaton.
///
/// # Usage
///
/// ```
/// use genetic_dfa::dfa::TrainingSet;
/// use genetic_dfa::ga::{EvolutionConfig, Evolution};
///
/// let training: TrainingSet = [("0", true), ("1", false), ("10", false), ("101", true)]
///     .into_iter()
///     .collect();
/// let config = EvolutionConfig::default().with_max_epochs(50).with_seed(42);
///
/// let result = Evolution::new(config, training).unwrap().run();
/// assert!(result.epochs <= 50);
/// assert_eq!(result.history.len(), result.history.best().len());
/// ```
#[derive(Debug, Clone)]
pub struct Evolution<R = StdRng> {
    config: EvolutionConfig,
    training: TrainingSet,
    population: Vec<Automaton>,
    history: FitnessHistory,
    epoch: usize,
    state: EpochState,
    rng: R,
}

impl Evolution<StdRng> {
    /// Validates the inputs and builds the initial random population.
    ///
    /// The random source is seeded from `config.seed`, or from fresh
    /// entropy when no seed is set.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the training set
    /// is empty, or an example uses a symbol outside the alphabet.
    pub fn new(config: EvolutionConfig, training: TrainingSet) -> Result<Self, EvolutionError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(config, training, rng)
    }
}

impl<R: Rng> Evolution<R> {
    /// Like [`Evolution::new`], but draws all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(
        config: EvolutionConfig,
        training: TrainingSet,
        mut rng: R,
    ) -> Result<Self, EvolutionError> {
        config.validate()?;
        if training.is_empty() {
            return Err(EvolutionError::EmptyTrainingSet);
        }
        if let Some((example, symbol)) = training.find_invalid_symbol(config.alphabet_size) {
            return Err(EvolutionError::SymbolOutOfRange {
                example: example.input.clone(),
                symbol,
                alphabet_size: config.alphabet_size,
            });
        }

        let population = (0..config.population_size)
            .map(|_| Automaton::create_random(&config, &mut rng))
            .collect();

        debug!(
            population = config.population_size,
            elitism = config.elitism_offset,
            mutation_rate = config.mutation_rate,
            max_epochs = config.max_epochs,
            examples = training.len(),
            "evolution initialized"
        );

        Ok(Self {
            history: FitnessHistory::with_capacity(config.max_epochs + 1),
            config,
            training,
            population,
            epoch: 0,
            state: EpochState::Initialized,
            rng,
        })
    }

    /// Runs one epoch and returns the resulting state.
    ///
    /// Once the run is [`Converged`](EpochState::Converged) or
    /// [`Exhausted`](EpochState::Exhausted) this is a no-op.
    ///
    /// A converged or exhausted epoch leaves the evaluated, ranked
    /// population in place; otherwise the population is replaced by the
    /// next generation and the epoch counter advances.
    pub fn step(&mut self) -> EpochState {
        if self.state.is_terminal() {
            return self.state;
        }

        self.evaluate_population();
        rank(&mut self.population);

        let best = self.population[0].fitness();
        let average = self.average_fitness();
        self.history.record(average, best);
        debug!(epoch = self.epoch, average, best, "epoch evaluated");

        if best >= 1.0 {
            info!(epoch = self.epoch, champion = %self.population[0], "perfect automaton found");
            self.state = EpochState::Converged;
        } else if self.epoch >= self.config.max_epochs {
            info!(epoch = self.epoch, best, "epoch budget exhausted");
            self.state = EpochState::Exhausted;
        } else {
            self.population = self.next_generation();
            self.epoch += 1;
            self.state = EpochState::Running;
        }
        self.state
    }

    /// Steps until the run converges or exhausts its budget.
    pub fn run_to_end(&mut self) -> EpochState {
        while !self.step().is_terminal() {}
        self.state
    }

    /// Runs to completion and hands back the outcome.
    pub fn run(mut self) -> EvolutionResult {
        self.run_to_end();
        self.into_result()
    }

    /// Packs the current state into an [`EvolutionResult`].
    ///
    /// Meaningful after the run has reached a terminal state, when the
    /// population is evaluated and ranked.
    pub fn into_result(self) -> EvolutionResult {
        let best = self.population[0].clone();
        EvolutionResult {
            best_fitness: best.fitness(),
            best,
            epochs: self.epoch,
            converged: self.state == EpochState::Converged,
            history: self.history,
            population: self.population,
        }
    }

    /// Scores every individual whose cache is empty.
    fn evaluate_population(&mut self) {
        evaluate_pending(
            &mut self.population,
            &self.training,
            self.config.parallel,
        );
    }

    /// Elites plus roulette-selected crossover children, then gated
    /// mutation over the whole generation.
    fn next_generation(&mut self) -> Vec<Automaton> {
        let size = self.config.population_size;
        let elites = self.config.elitism_offset;

        let mut next: Vec<Automaton> = Vec::with_capacity(size);
        next.extend_from_slice(&self.population[..elites]);

        while next.len() < size {
            let first = roulette(&self.population, &mut self.rng);
            let second = roulette(&self.population, &mut self.rng);
            next.push(crossover(
                &self.population[first],
                &self.population[second],
                &mut self.rng,
            ));
        }

        for ind in &mut next {
            gated_mutation(
                ind,
                self.config.mutation_rate,
                self.config.gene_mutation_rate,
                &mut self.rng,
            );
        }
        next
    }

    fn average_fitness(&self) -> f64 {
        self.population.iter().map(Automaton::fitness).sum::<f64>() / self.population.len() as f64
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EpochState {
        self.state
    }

    /// Number of completed generation replacements.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// The current population, ranked after each evaluated epoch.
    pub fn population(&self) -> &[Automaton] {
        &self.population
    }

    /// The top-ranked individual of the current population.
    ///
    /// Only meaningful once an epoch has been evaluated and the run has
    /// stopped; while running, the population holds unevaluated offspring.
    pub fn best(&self) -> &Automaton {
        &self.population[0]
    }

    /// Average and best fitness per evaluated epoch.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// The configuration of this run.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The labeled examples driving selection.
    pub fn training_set(&self) -> &TrainingSet {
        &self.training
    }
}

/// Evaluate the individuals that have no cached fitness.
///
/// Elites carried over unmutated keep their score and are skipped.
#[cfg(feature = "parallel")]
fn evaluate_pending(population: &mut [Automaton], training: &TrainingSet, parallel: bool) {
    let examples = training.examples();
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .for_each(|ind| {
                ind.evaluate(examples);
            });
    } else {
        for ind in population.iter_mut().filter(|ind| !ind.is_evaluated()) {
            ind.evaluate(examples);
        }
    }
}

/// Evaluate the individuals that have no cached fitness.
///
/// Without the `parallel` feature the flag is ignored.
#[cfg(not(feature = "parallel"))]
fn evaluate_pending(population: &mut [Automaton], training: &TrainingSet, _parallel: bool) {
    let examples = training.examples();
    for ind in population.iter_mut().filter(|ind| !ind.is_evaluated()) {
        ind.evaluate(examples);
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual of the final ranked population.
    pub best: Automaton,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generation replacements performed.
    pub epochs: usize,

    /// Whether a perfect automaton was found.
    pub converged: bool,

    /// Average and best fitness of every evaluated epoch.
    pub history: FitnessHistory,

    /// Final ranked population.
    pub population: Vec<Automaton>,
}

impl EvolutionResult {
    /// Headline numbers for display.
    pub fn summary(&self) -> RunSummary {
        let (average_final_fitness, best_final_fitness) = self.history.last().unwrap_or((0.0, 0.0));
        RunSummary {
            epochs_run: self.epochs,
            best_final_fitness,
            average_final_fitness,
            converged: self.converged,
        }
    }
}

/// Compact outcome report.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    /// Number of generation replacements performed.
    pub epochs_run: usize,
    /// Best fitness of the last evaluated epoch.
    pub best_final_fitness: f64,
    /// Mean fitness of the last evaluated epoch.
    pub average_final_fitness: f64,
    /// Whether a perfect automaton was found.
    pub converged: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::language;

    fn small_set() -> TrainingSet {
        [
            ("0", true),
            ("101", true),
            ("1010", true),
            ("1111", true),
            ("1", false),
            ("10", false),
            ("11", false),
            ("100", false),
            ("110", false),
            ("111", false),
        ]
        .into_iter()
        .collect()
    }

    /// Every string accepted: learnable by the very first population.
    fn trivial_set() -> TrainingSet {
        [("0", true), ("1", true), ("01", true)].into_iter().collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EvolutionConfig::default().with_elitism_offset(500);
        assert!(matches!(
            Evolution::new(config, small_set()),
            Err(EvolutionError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_empty_training_set() {
        let err = Evolution::new(EvolutionConfig::default(), TrainingSet::default()).unwrap_err();
        assert_eq!(err, EvolutionError::EmptyTrainingSet);
    }

    #[test]
    fn test_new_rejects_foreign_symbol() {
        let training: TrainingSet = [("0120", true)].into_iter().collect();
        let err = Evolution::new(EvolutionConfig::default(), training).unwrap_err();
        assert_eq!(
            err,
            EvolutionError::SymbolOutOfRange {
                example: "0120".into(),
                symbol: '2',
                alphabet_size: 2
            }
        );
    }

    #[test]
    fn test_initial_state() {
        let config = EvolutionConfig::default()
            .with_population_size(25)
            .with_elitism_offset(5)
            .with_seed(1);
        let evo = Evolution::new(config, small_set()).unwrap();

        assert_eq!(evo.state(), EpochState::Initialized);
        assert_eq!(evo.epoch(), 0);
        assert_eq!(evo.population().len(), 25);
        assert!(evo.history().is_empty());
        assert!(evo.population().iter().all(|d| !d.is_evaluated()));
    }

    #[test]
    fn test_step_records_history() {
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_elitism_offset(5)
            .with_max_epochs(10)
            .with_seed(42);
        let mut evo = Evolution::new(config, small_set()).unwrap();

        let state = evo.step();
        assert_eq!(evo.history().len(), 1);
        if state == EpochState::Running {
            assert_eq!(evo.epoch(), 1);
            assert_eq!(evo.population().len(), 30);
        }
        let (average, best) = evo.history().last().unwrap();
        assert!((0.0..=1.0).contains(&average));
        assert!(average <= best);
    }

    #[test]
    fn test_converges_immediately_on_trivial_set() {
        let config = EvolutionConfig::default()
            .with_population_size(200)
            .with_accept_rate(1.0)
            .with_seed(3);
        let mut evo = Evolution::new(config, trivial_set()).unwrap();

        assert_eq!(evo.step(), EpochState::Converged);
        assert_eq!(evo.epoch(), 0);
        assert_eq!(evo.history().len(), 1);
        assert!((evo.best().fitness() - 1.0).abs() < 1e-12);

        // Terminal: further steps change nothing.
        let before = evo.population().to_vec();
        assert_eq!(evo.step(), EpochState::Converged);
        assert_eq!(evo.population(), before.as_slice());
        assert_eq!(evo.history().len(), 1);
    }

    #[test]
    fn test_exhausts_budget() {
        // All-accepting automata cannot reject, so the negative example
        // keeps every individual below 1.0.
        let training: TrainingSet = [("0", true), ("1", false)].into_iter().collect();
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_elitism_offset(2)
            .with_mutation_rate(0.0)
            .with_accept_rate(1.0)
            .with_max_epochs(7)
            .with_seed(5);

        let result = Evolution::new(config, training).unwrap().run();

        assert!(!result.converged);
        assert_eq!(result.epochs, 7);
        assert_eq!(result.history.len(), 8);
        assert!((result.best_fitness - 0.5).abs() < 1e-12);
        assert_eq!(result.summary().epochs_run, 7);
    }

    #[test]
    fn test_final_population_is_ranked() {
        let config = EvolutionConfig::default()
            .with_population_size(40)
            .with_max_epochs(5)
            .with_seed(8);
        let result = Evolution::new(config, small_set()).unwrap().run();

        assert!(result.population.iter().all(Automaton::is_evaluated));
        for pair in result.population.windows(2) {
            assert!(pair[0].fitness() >= pair[1].fitness());
        }
        assert!((result.best_fitness - result.population[0].fitness()).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_max_epochs(20)
            .with_mutation_rate(0.3)
            .with_seed(99);

        let a = Evolution::new(config.clone(), small_set()).unwrap().run();
        let b = Evolution::new(config, small_set()).unwrap().run();

        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
        assert_eq!(a.epochs, b.epochs);
    }

    #[test]
    fn test_with_rng_injection() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_elitism_offset(2)
            .with_max_epochs(3);
        let a = Evolution::with_rng(config.clone(), small_set(), StdRng::seed_from_u64(4))
            .unwrap()
            .run();
        let b = Evolution::with_rng(config, small_set(), StdRng::seed_from_u64(4))
            .unwrap()
            .run();
        assert_eq!(a.population, b.population);
    }

    #[test]
    fn test_elites_survive_without_mutation() {
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_elitism_offset(4)
            .with_mutation_rate(0.0)
            .with_max_epochs(10)
            .with_seed(12);
        let mut evo = Evolution::new(config, small_set()).unwrap();

        evo.evaluate_population();
        rank(&mut evo.population);
        let elites: Vec<Automaton> = evo.population[..4].to_vec();
        let next = evo.next_generation();

        assert_eq!(next.len(), 20);
        assert_eq!(&next[..4], elites.as_slice());
        assert!(next[4..].iter().all(|d| !d.is_evaluated()));
    }

    #[test]
    fn test_mutation_gate_covers_elites() {
        let config = EvolutionConfig::default()
            .with_population_size(12)
            .with_elitism_offset(12)
            .with_mutation_rate(1.0)
            .with_gene_mutation_rate(1.0)
            .with_seed(30);
        let mut evo = Evolution::new(config, small_set()).unwrap();

        evo.evaluate_population();
        rank(&mut evo.population);
        let ranked = evo.population.clone();
        let next = evo.next_generation();

        for (after, before) in next.iter().zip(&ranked) {
            assert!(!after.is_evaluated());
            for (a, b) in after.accept_states().iter().zip(before.accept_states()) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_best_fitness_never_drops_with_elitism() {
        let mut rng = StdRng::seed_from_u64(2);
        let training = language::reference_set(&mut rng);
        let config = EvolutionConfig::default()
            .with_population_size(50)
            .with_elitism_offset(5)
            .with_mutation_rate(0.0)
            .with_max_epochs(40)
            .with_seed(2);

        let result = Evolution::new(config, training).unwrap().run();
        for window in result.history.best().windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness should be non-decreasing with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_summary() {
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_elitism_offset(4)
            .with_max_epochs(3)
            .with_seed(6);
        let result = Evolution::new(config, small_set()).unwrap().run();
        let summary = result.summary();

        let (average, best) = result.history.last().unwrap();
        assert_eq!(summary.epochs_run, result.epochs);
        assert!((summary.best_final_fitness - best).abs() < 1e-12);
        assert!((summary.average_final_fitness - average).abs() < 1e-12);
        assert_eq!(summary.converged, result.converged);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = EvolutionConfig::default()
            .with_population_size(60)
            .with_max_epochs(15)
            .with_seed(21);

        let sequential = Evolution::new(config.clone(), small_set()).unwrap().run();
        let parallel = Evolution::new(config.with_parallel(true), small_set())
            .unwrap()
            .run();

        assert_eq!(sequential.history, parallel.history);
        assert_eq!(sequential.best, parallel.best);
    }
}
