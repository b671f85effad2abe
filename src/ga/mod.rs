//! Genetic algorithm over automata.
//!
//! The engine evolves a population of [`Automaton`](crate::dfa::Automaton)
//! candidates toward perfect accuracy on a
//! [`TrainingSet`](crate::dfa::TrainingSet).
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: all tunables of a run, validated before use
//! - [`Settings`]: raw text settings, parsed into an [`EvolutionConfig`]
//! - [`Evolution`]: owns the population and drives epochs
//! - [`EvolutionResult`] / [`RunSummary`]: what a finished run reports
//! - [`FitnessHistory`]: average and best fitness per epoch
//!
//! # Submodules
//!
//! - [`selection`]: stable ranking and roulette-wheel selection
//! - [`operators`]: rectangular crossover and two-level mutation gating
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Lucas & Reynolds (2005), "Learning Deterministic Finite Automata with a
//!   Smart State Labeling Evolutionary Algorithm"

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{EvolutionConfig, Settings};
pub use runner::{Evolution, EvolutionResult, RunSummary};
pub use types::{EpochState, FitnessHistory, Individual};
