//! Empirical-distribution sampling over a discrete probability vector
//!
//! Implements the draw capability the patient state machine consumes: given
//! a probability row (summing to 1.0) and a draw source, return one index.
//! Sampling is inverse-CDF on a uniform draw, so repeated calls with the
//! same seed and the same rows reproduce the same index sequence, and the
//! empirical frequency of each index converges to its assigned probability.

use super::xorshift::RngManager;

/// Inverse-CDF sampler borrowing a probability row.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::{EmpiricalDistribution, RngManager};
///
/// let mut rng = RngManager::new(42);
/// let dist = EmpiricalDistribution::new(&[0.0, 0.0, 1.0, 0.0]);
/// assert_eq!(dist.sample(&mut rng), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmpiricalDistribution<'a> {
    probabilities: &'a [f64],
}

impl<'a> EmpiricalDistribution<'a> {
    /// Wrap a probability vector.
    ///
    /// The caller guarantees entries are non-negative and sum to 1.0; rows
    /// handed out by `TherapyParameters` are validated at construction.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    pub fn new(probabilities: &'a [f64]) -> Self {
        assert!(
            !probabilities.is_empty(),
            "probability vector must be non-empty"
        );
        Self { probabilities }
    }

    /// Draw one index, distributed according to the wrapped probabilities.
    ///
    /// Walks the cumulative distribution against a uniform draw. The last
    /// index absorbs the floating-point remainder when the cumulative sum
    /// falls a few ulps short of 1.0.
    pub fn sample(&self, rng: &mut RngManager) -> usize {
        let draw = rng.next_f64();
        let mut cumulative = 0.0;
        for (index, probability) in self.probabilities.iter().enumerate() {
            cumulative += probability;
            if draw < cumulative {
                return index;
            }
        }
        self.probabilities.len() - 1
    }
}
