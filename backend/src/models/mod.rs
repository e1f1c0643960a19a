//! Domain types for the microsimulation
//!
//! - `health_state`: the closed set of Markov health states
//! - `therapy`: the closed set of treatment policies
//! - `outcome`: the by-value per-patient outcome record

pub mod health_state;
pub mod outcome;
pub mod therapy;

pub use health_state::{HealthState, STATE_COUNT};
pub use outcome::PatientOutcome;
pub use therapy::Therapy;
