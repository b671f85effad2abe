//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every tunable of a run. [`Settings`] is the
//! raw-text form a settings form hands over; [`Settings::parse`] turns it
//! into a validated configuration or a [`ConfigError`].

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for evolving automata.
///
/// # Defaults
///
/// ```
/// use genetic_dfa::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elitism_offset, 30);
/// assert_eq!(config.state_count, 5);
/// assert_eq!(config.alphabet_size, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use genetic_dfa::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_elitism_offset(30)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// The builder stores values as given. Out-of-domain values are reported by
/// [`validate`](Self::validate), never clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvolutionConfig {
    /// Number of automata in the population.
    pub population_size: usize,

    /// Number of top-ranked automata copied into the next generation.
    ///
    /// Must not exceed `population_size`. Equal to it means no offspring.
    pub elitism_offset: usize,

    /// Probability that an individual of the new generation is mutated at
    /// all (population-level gate).
    pub mutation_rate: f64,

    /// Maximum number of epochs before giving up.
    pub max_epochs: usize,

    /// Number of states of every automaton.
    pub state_count: usize,

    /// Number of input symbols.
    pub alphabet_size: usize,

    /// Probability that a state starts out accepting.
    pub accept_rate: f64,

    /// Probability that a single gene changes once an individual is chosen
    /// for mutation (individual-level gate).
    pub gene_mutation_rate: f64,

    /// Evaluate the population on the rayon thread pool.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elitism_offset: 30,
            mutation_rate: 0.05,
            max_epochs: 1000,
            state_count: 5,
            alphabet_size: 2,
            accept_rate: 0.20,
            gene_mutation_rate: 0.10,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Preset matching the interactive settings form: population 200,
    /// 30 elites, mutation rate 0.2, 1000 epochs.
    pub fn interactive() -> Self {
        Self {
            population_size: 200,
            elitism_offset: 30,
            mutation_rate: 0.20,
            max_epochs: 1000,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_offset(mut self, n: usize) -> Self {
        self.elitism_offset = n;
        self
    }

    /// Sets the population-level mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the epoch cap.
    pub fn with_max_epochs(mut self, n: usize) -> Self {
        self.max_epochs = n;
        self
    }

    /// Sets the number of automaton states.
    pub fn with_state_count(mut self, n: usize) -> Self {
        self.state_count = n;
        self
    }

    /// Sets the alphabet size.
    pub fn with_alphabet_size(mut self, n: usize) -> Self {
        self.alphabet_size = n;
        self
    }

    /// Sets the initial accept-state probability.
    pub fn with_accept_rate(mut self, rate: f64) -> Self {
        self.accept_rate = rate;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_gene_mutation_rate(mut self, rate: f64) -> Self {
        self.gene_mutation_rate = rate;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.elitism_offset > self.population_size {
            return Err(ConfigError::ElitismExceedsPopulation {
                elitism_offset: self.elitism_offset,
                population_size: self.population_size,
            });
        }
        if self.max_epochs == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        if self.state_count == 0 {
            return Err(ConfigError::ZeroStates);
        }
        if self.alphabet_size == 0 {
            return Err(ConfigError::ZeroAlphabet);
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("accept_rate", self.accept_rate)?;
        check_rate("gene_mutation_rate", self.gene_mutation_rate)?;
        Ok(())
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { field, value })
    }
}

/// Raw settings as typed into a form.
///
/// Only the four user-facing knobs are text; the remaining fields of
/// [`EvolutionConfig`] come from `base`.
///
/// ```
/// use genetic_dfa::ga::Settings;
///
/// let config = Settings::new("200", "30", "0.20", "1000").parse().unwrap();
/// assert_eq!(config.population_size, 200);
///
/// assert!(Settings::new("many", "30", "0.2", "1000").parse().is_err());
/// assert!(Settings::new("20", "30", "0.2", "1000").parse().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Population size field.
    pub population_size: String,
    /// Elitism offset field.
    pub elitism_offset: String,
    /// Mutation rate field.
    pub mutation_rate: String,
    /// Max epochs field.
    pub max_epochs: String,
    /// Values for everything not exposed as text.
    pub base: EvolutionConfig,
}

impl Settings {
    /// Bundles the four text fields on top of the default configuration.
    pub fn new(
        population_size: impl Into<String>,
        elitism_offset: impl Into<String>,
        mutation_rate: impl Into<String>,
        max_epochs: impl Into<String>,
    ) -> Self {
        Self {
            population_size: population_size.into(),
            elitism_offset: elitism_offset.into(),
            mutation_rate: mutation_rate.into(),
            max_epochs: max_epochs.into(),
            base: EvolutionConfig::default(),
        }
    }

    /// Replaces the configuration the text fields are applied to.
    pub fn with_base(mut self, base: EvolutionConfig) -> Self {
        self.base = base;
        self
    }

    /// Parses and validates the settings.
    ///
    /// Negative integers are reported as [`ConfigError::NotNumeric`]
    /// since sizes are unsigned.
    pub fn parse(&self) -> Result<EvolutionConfig, ConfigError> {
        let config = EvolutionConfig {
            population_size: parse_field("population_size", &self.population_size)?,
            elitism_offset: parse_field("elitism_offset", &self.elitism_offset)?,
            mutation_rate: parse_field("mutation_rate", &self.mutation_rate)?,
            max_epochs: parse_field("max_epochs", &self.max_epochs)?,
            ..self.base.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}
