//! Reference target language: binary numerals divisible by a modulus.
//!
//! The evolutionary core accepts any [`TrainingSet`]; this module only
//! provides the default one used to demonstrate the search.

use rand::Rng;

use super::fitness::{Example, TrainingSet};

/// Divisor of the reference language.
pub const DEFAULT_MODULUS: u32 = 5;

/// Number of examples in the reference training set.
pub const DEFAULT_TRAINING_SIZE: usize = 100;

/// Negative examples are drawn from `[0, NEGATIVE_SAMPLE_BOUND)`.
pub const NEGATIVE_SAMPLE_BOUND: u32 = 1000;

/// Binary numeral of `n` without leading zeros (`0` is `"0"`).
pub fn to_binary(n: u64) -> String {
    format!("{n:b}")
}

/// Builds a training set for "binary numerals divisible by `modulus`".
///
/// The first `size / 2` examples are the positives `0, m, 2m, ...` in
/// increasing order. The remaining examples are negatives sampled uniformly
/// from `[0, NEGATIVE_SAMPLE_BOUND)`, skipping multiples of `m`.
///
/// # Panics
/// Panics if `modulus < 2` (no negatives would exist).
///
/// ```
/// use genetic_dfa::dfa::language::divisible_by;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let set = divisible_by(5, 10, &mut rng);
/// assert_eq!(set.len(), 10);
/// assert_eq!(set.positives(), 5);
/// assert_eq!(set.examples()[2].input, "1010");
/// ```
pub fn divisible_by<R: Rng>(modulus: u32, size: usize, rng: &mut R) -> TrainingSet {
    assert!(modulus >= 2, "modulus must be at least 2");

    let positive_count = size / 2;
    let mut examples = Vec::with_capacity(size);

    // u64 so that `modulus * (size / 2)` cannot overflow
    let step = u64::from(modulus);
    let mut n = 0u64;
    for _ in 0..positive_count {
        examples.push(Example::new(to_binary(n), true));
        n += step;
    }

    while examples.len() < size {
        let n = rng.random_range(0..NEGATIVE_SAMPLE_BOUND);
        if n % modulus != 0 {
            examples.push(Example::new(to_binary(u64::from(n)), false));
        }
    }

    TrainingSet::new(examples)
}

/// The default training set: 100 examples of binary multiples of 5.
pub fn reference_set<R: Rng>(rng: &mut R) -> TrainingSet {
    divisible_by(DEFAULT_MODULUS, DEFAULT_TRAINING_SIZE, rng)
}
