//! Core types shared by the GA components.
//!
//! [`Individual`] is the contract between the generic ranking/selection
//! code and the candidates it operates on. [`EpochState`] and
//! [`FitnessHistory`] describe the progress of an
//! [`Evolution`](super::Evolution).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate solution carrying a cached fitness score.
///
/// Fitness is **maximized** and expected to lie in `[0, 1]`. Candidates
/// that have not been evaluated report `0.0`.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Candidate {
///     genes: Vec<u8>,
///     fitness: f64,
/// }
///
/// impl Individual for Candidate {
///     fn fitness(&self) -> f64 { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = f; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the current fitness of this individual.
    fn fitness(&self) -> f64;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Lifecycle of an evolutionary run.
///
/// ```text
/// Initialized ──step──> Running ──step──> ... ──> Converged | Exhausted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochState {
    /// Random population built, nothing evaluated yet.
    Initialized,
    /// At least one epoch completed without a perfect individual.
    Running,
    /// An individual with fitness `1.0` was found.
    Converged,
    /// The epoch budget ran out.
    Exhausted,
}

impl EpochState {
    /// Whether no further epochs will run.
    pub fn is_terminal(self) -> bool {
        matches!(self, EpochState::Converged | EpochState::Exhausted)
    }
}

/// Average and best fitness of every evaluated epoch.
///
/// Both sequences are append-only and always have equal length.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessHistory {
    average: Vec<f64>,
    best: Vec<f64>,
}

impl FitnessHistory {
    /// Creates an empty history with room for `epochs` entries.
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            average: Vec::with_capacity(epochs),
            best: Vec::with_capacity(epochs),
        }
    }

    /// Appends one epoch.
    pub fn record(&mut self, average: f64, best: f64) {
        self.average.push(average);
        self.best.push(best);
    }

    /// Mean population fitness per epoch.
    pub fn average(&self) -> &[f64] {
        &self.average
    }

    /// Best population fitness per epoch.
    pub fn best(&self) -> &[f64] {
        &self.best
    }

    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// The most recent `(average, best)` pair.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.average.last()?, *self.best.last()?))
    }
}
