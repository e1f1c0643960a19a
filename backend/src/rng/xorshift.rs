//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Each patient owns one
//! `RngManager` seeded with its patient id, so a patient's entire transition
//! path is reproducible from `(patient_id, parameters)` alone, independent
//! of how many other patients ran before it.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let draw = rng.next_f64(); // uniform in [0.0, 1.0)
/// assert!(draw >= 0.0 && draw < 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed
    ///
    /// A zero seed is coerced to 1 (xorshift requirement), so patient id 0
    /// and patient id 1 share a draw sequence.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64 value, advancing the internal state.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random f64 in [0.0, 1.0)
    ///
    /// This is the draw consumed by [`EmpiricalDistribution`] for
    /// inverse-CDF sampling.
    ///
    /// [`EmpiricalDistribution`]: super::EmpiricalDistribution
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) using the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Current internal state (for reproducibility checks)
    pub fn state(&self) -> u64 {
        self.state
    }
}
