//! Labeled examples and the fitness function.

use super::automaton::{symbol_of, Automaton};

/// An input string with its expected membership in the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Symbols, one character each.
    pub input: String,
    /// Whether the input belongs to the language.
    pub expected: bool,
}

impl Example {
    /// Creates an example.
    pub fn new(input: impl Into<String>, expected: bool) -> Self {
        Self {
            input: input.into(),
            expected,
        }
    }
}

/// A fixed, ordered collection of labeled examples.
///
/// ```
/// use genetic_dfa::dfa::TrainingSet;
///
/// let set: TrainingSet = [("101", true), ("11", false)].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.positives(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingSet {
    examples: Vec<Example>,
}

impl TrainingSet {
    /// Wraps a list of examples.
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the set has no examples.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Iterates over the examples in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    /// The examples as a slice.
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Number of examples labeled as members.
    pub fn positives(&self) -> usize {
        self.examples.iter().filter(|e| e.expected).count()
    }

    /// First character whose numeric value is not below `alphabet_size`,
    /// together with the example it occurs in.
    pub fn find_invalid_symbol(&self, alphabet_size: usize) -> Option<(&Example, char)> {
        self.examples.iter().find_map(|example| {
            example
                .input
                .chars()
                .find(|&c| !matches!(symbol_of(c), Some(s) if s < alphabet_size))
                .map(|c| (example, c))
        })
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for TrainingSet {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(input, expected)| Example::new(input, expected))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

/// Fraction of `examples` that `automaton` classifies correctly.
///
/// Returns `0.0` for an empty slice. Does not touch the automaton's cache;
/// see [`Automaton::evaluate`] for the caching variant.
pub fn evaluate(automaton: &Automaton, examples: &[Example]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    let correct = examples
        .iter()
        .filter(|e| automaton.run(&e.input) == e.expected)
        .count();
    correct as f64 / examples.len() as f64
}
