//! Cohort simulation and outcome aggregation
//!
//! See `engine.rs` for the population loop and `outcomes.rs` for the
//! aggregation contract.

pub mod engine;
pub mod outcomes;

pub use engine::{Cohort, SimulationError};
pub use outcomes::{CohortOutcomes, EmptyOutcomeSetError, SurvivalCurve, SurvivalCurvePoint};
