//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic draws, plus
//! inverse-CDF sampling over discrete probability vectors.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod empirical;
mod xorshift;

pub use empirical::EmpiricalDistribution;
pub use xorshift::RngManager;
