use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// The source of every random choice made while generating and writing formulas.
///
/// Generators take it as an argument instead of reaching for a global generator, so a seeded
/// [`rand`] generator reproduces the same formulas and tests can script the exact choices.
///
/// ```rust
/// # use rand::rngs::SmallRng;
/// # use rand::SeedableRng;
/// # use satbench_cnf::Random;
/// let mut first = SmallRng::seed_from_u64(7);
/// let mut second = SmallRng::seed_from_u64(7);
///
/// assert_eq!(
///     first.generate_usize_in_range(0..100),
///     second.generate_usize_in_range(0..100)
/// );
/// ```
pub trait Random: Debug {
    /// Returns `true` with the given probability, which lies in `[0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Draws uniformly from `[range.start, range.end)`.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "probability {probability} is outside of [0, 1]"
        );

        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }
}
