//! Deterministic finite automata as evolvable candidates.
//!
//! - [`Automaton`]: transition table, accept flags, start state, cached
//!   fitness; random construction, execution and per-gene mutation
//! - [`TrainingSet`] / [`Example`]: labeled strings of the target language
//! - [`evaluate`]: fraction of examples classified correctly
//! - [`language`]: the reference "binary multiples of 5" training data
//!
//! Symbols are the numeric values of input characters, so a binary
//! alphabet reads `'0'` and `'1'`.

mod automaton;
mod fitness;
pub mod language;

pub use automaton::{Automaton, INITIAL_STATE};
pub use fitness::{evaluate, Example, TrainingSet};
