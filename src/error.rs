//! Error types.
//!
//! Two layers of failure exist:
//!
//! | Type | Raised when |
//! |------|-------------|
//! | [`ConfigError`] | a setting is non-numeric or outside its domain |
//! | [`EvolutionError`] | an [`Evolution`](crate::ga::Evolution) cannot be built |
//!
//! Both are reported before any population exists, so a failed attempt
//! never disturbs the results of an earlier run. Degenerate selection
//! (all-zero fitness) is not an error: the selector falls back to a
//! uniform pick.

use thiserror::Error;

/// An invalid or missing configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A settings field could not be parsed as a number.
    #[error("{field} must be numeric, got {value:?}")]
    NotNumeric {
        /// Name of the offending field.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },

    /// `population_size` is zero.
    #[error("population_size must be at least 1")]
    ZeroPopulation,

    /// More elites requested than there are individuals.
    #[error("elitism_offset ({elitism_offset}) exceeds population_size ({population_size})")]
    ElitismExceedsPopulation {
        /// Requested elite count.
        elitism_offset: usize,
        /// Configured population size.
        population_size: usize,
    },

    /// `max_epochs` is zero.
    #[error("max_epochs must be at least 1")]
    ZeroEpochs,

    /// `state_count` is zero.
    #[error("state_count must be at least 1")]
    ZeroStates,

    /// `alphabet_size` is zero.
    #[error("alphabet_size must be at least 1")]
    ZeroAlphabet,

    /// A probability lies outside `[0, 1]` (or is NaN).
    #[error("{field} must be within [0, 1], got {value}")]
    RateOutOfRange {
        /// Name of the offending rate.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Failure to set up an evolutionary run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    /// The configuration did not validate.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// No training examples were supplied.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// A training example uses a character outside the automaton alphabet.
    #[error("example {example:?} contains symbol {symbol:?} outside alphabet of size {alphabet_size}")]
    SymbolOutOfRange {
        /// Input string of the offending example.
        example: String,
        /// First offending character.
        symbol: char,
        /// Configured alphabet size.
        alphabet_size: usize,
    },

    /// Genes handed to [`Automaton::from_genes`](crate::dfa::Automaton::from_genes)
    /// failed a range check.
    #[error("invalid genes: {0}")]
    InvalidGenes(String),
}
