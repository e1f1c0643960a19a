//! Per-patient outcome record
//!
//! Extracted by value after a patient's run completes; the patient itself is
//! discarded. These records are the only thing the aggregation layer sees.

use serde::{Deserialize, Serialize};

/// Outcomes of one simulated patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientOutcome {
    /// Patient id (also the seed of its private draw source)
    pub patient_id: u64,

    /// Survival time in model time units; `None` if the patient was still
    /// alive when the simulation horizon was reached
    pub survival_time: Option<f64>,

    /// Number of steps that began in the Stroke state (occupancy counting;
    /// a state revisited across cycles is counted once per cycle)
    pub stroke_count: u32,

    /// Total cost, with each step's increment discounted to time zero
    pub discounted_cost: f64,

    /// Total health utility, discounted the same way
    pub discounted_utility: f64,
}
