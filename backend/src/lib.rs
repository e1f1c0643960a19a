//! Therapy Simulator Core - Rust Engine
//!
//! Individual-patient Markov microsimulation for comparative-effectiveness
//! analysis of competing therapies.
//!
//! # Architecture
//!
//! - **models**: Domain types (HealthState, Therapy, PatientOutcome)
//! - **params**: Study inputs and therapy-dependent parameter derivation
//! - **patient**: Per-patient stochastic state-transition loop
//! - **cohort**: Population loop and outcome aggregation
//! - **stats**: Summary statistics over outcome vectors
//! - **rng**: Deterministic random number generation and empirical sampling
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (per-patient seeded RNG)
//! 2. Transition matrices are validated row-stochastic at construction
//! 3. Every cost/utility increment is discounted independently back to time 0

// Module declarations
pub mod cohort;
pub mod models;
pub mod params;
pub mod patient;
pub mod rng;
pub mod stats;

// Re-exports for convenience
pub use cohort::{
    Cohort, CohortOutcomes, EmptyOutcomeSetError, SimulationError, SurvivalCurve,
    SurvivalCurvePoint,
};
pub use models::{HealthState, PatientOutcome, Therapy, STATE_COUNT};
pub use params::{InvalidMatrixError, StudyInputs, TherapyParameters, TransitionMatrix};
pub use patient::{CostUtilityAccumulator, Patient, PatientStateMonitor, UnreachableStateError};
pub use rng::{EmpiricalDistribution, RngManager};
pub use stats::{DifferenceStat, SummaryStat};
