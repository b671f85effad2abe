//! Evolving deterministic finite automata with a genetic algorithm.
//!
//! A population of random DFAs is scored against labeled example strings,
//! ranked, and bred by roulette-wheel selection, rectangular crossover and
//! two-level mutation until one automaton classifies every example
//! correctly or the epoch budget runs out.
//!
//! - [`dfa`]: the automaton candidate, training data and fitness function
//! - [`ga`]: configuration, selection, reproduction and the epoch loop
//! - [`error`]: configuration and setup failures
//!
//! # Example
//!
//! ```
//! use genetic_dfa::dfa::language;
//! use genetic_dfa::ga::{Evolution, EvolutionConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let training = language::reference_set(&mut rng);
//!
//! let config = EvolutionConfig::interactive().with_max_epochs(20).with_seed(1);
//! let result = Evolution::new(config, training).unwrap().run();
//!
//! let summary = result.summary();
//! assert!(summary.best_final_fitness >= summary.average_final_fitness);
//! for (from, symbol, to) in result.best.edges() {
//!     let _ = (from, symbol, to); // draw an edge labeled `symbol`
//! }
//! ```
//!
//! All randomness comes from one seedable generator per run, so a fixed
//! [`seed`](ga::EvolutionConfig::seed) reproduces a run exactly.

pub mod dfa;
pub mod error;
pub mod ga;

pub use dfa::{Automaton, Example, TrainingSet};
pub use error::{ConfigError, EvolutionError};
pub use ga::{Evolution, EvolutionConfig, EvolutionResult, Individual};
