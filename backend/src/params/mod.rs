//! Study inputs and therapy-dependent parameter derivation
//!
//! `StudyInputs` is the single, explicit, immutable configuration value for a
//! simulation run; nothing in the engine reads process-wide state, so several
//! policies or horizons can run concurrently without cross-talk.
//! `TherapyParameters` derives everything a patient needs for one policy:
//! initial state, step length, adjusted discount rate, treatment cost, and
//! the (possibly risk-adjusted) transition matrix.

pub mod matrix;

use serde::{Deserialize, Serialize};

use crate::models::health_state::{HealthState, STATE_COUNT};
use crate::models::therapy::Therapy;

pub use matrix::{InvalidMatrixError, TransitionMatrix, PROBABILITY_TOLERANCE};

/// Static inputs of a study, loaded once and shared read-only.
///
/// `Default` carries the reference stroke/anticoagulation study values.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::StudyInputs;
///
/// let inputs = StudyInputs::default();
/// assert_eq!(inputs.population_size, 2000);
/// assert_eq!(inputs.delta_t, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyInputs {
    /// Cohort population size
    pub population_size: usize,

    /// Length of the simulation in model time units (years)
    pub sim_length: f64,

    /// Length of one time step (years)
    pub delta_t: f64,

    /// Significance level for confidence intervals
    pub alpha: f64,

    /// Annual discount rate
    pub discount_rate: f64,

    /// Health state every patient starts in
    pub initial_state: HealthState,

    /// Baseline transition probability matrix, `[from][to]` under the
    /// canonical state ordering
    pub transition_matrix: [[f64; STATE_COUNT]; STATE_COUNT],

    /// Annual cost of each health state
    pub annual_state_costs: [f64; STATE_COUNT],

    /// Annual health utility of each health state
    pub annual_state_utilities: [f64; STATE_COUNT],

    /// Annual drug cost under anticoagulation
    pub annual_anticoagulant_cost: f64,

    /// Anticoagulation relative risk of a recurrent stroke while Post-Stroke
    pub rr_stroke: f64,

    /// Anticoagulation relative risk of bleeding mortality
    pub rr_bleeding: f64,
}

impl Default for StudyInputs {
    fn default() -> Self {
        Self {
            population_size: 2000,
            sim_length: 50.0, // years
            delta_t: 1.0,     // one transition per year
            alpha: 0.05,
            discount_rate: 0.03,
            initial_state: HealthState::Well,
            transition_matrix: [
                [0.75, 0.15, 0.0, 0.1], // Well
                [0.0, 0.0, 1.0, 0.0],   // Stroke
                [0.0, 0.25, 0.55, 0.2], // Post-Stroke
                [0.0, 0.0, 0.0, 1.0],   // Dead
            ],
            annual_state_costs: [0.0, 5000.0, 200.0, 0.0],
            annual_state_utilities: [1.0, 0.8865, 0.9, 0.0],
            annual_anticoagulant_cost: 2000.0,
            rr_stroke: 0.65,
            rr_bleeding: 1.05,
        }
    }
}

/// Per-policy parameters shared read-only by every patient in a cohort.
///
/// Construction is the fail-fast boundary: the baseline matrix is validated
/// first, then the therapy variant is derived and validated, so a malformed
/// configuration never reaches the simulation loop.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::{StudyInputs, Therapy, TherapyParameters};
///
/// let inputs = StudyInputs::default();
/// let params = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap();
/// assert_eq!(params.annual_treatment_cost(), 2000.0);
/// assert_eq!(params.adj_discount_rate(), 0.03);
/// ```
#[derive(Debug, Clone)]
pub struct TherapyParameters {
    therapy: Therapy,
    initial_state: HealthState,
    delta_t: f64,
    /// Discount rate adjusted to the step length (annual rate × Δt)
    adj_discount_rate: f64,
    matrix: TransitionMatrix,
    annual_state_costs: [f64; STATE_COUNT],
    annual_state_utilities: [f64; STATE_COUNT],
    annual_treatment_cost: f64,
}

impl TherapyParameters {
    /// Derive the parameters of one therapy from the study inputs.
    pub fn new(therapy: Therapy, inputs: &StudyInputs) -> Result<Self, InvalidMatrixError> {
        let baseline = TransitionMatrix::from_rows(inputs.transition_matrix)?;
        let matrix = match therapy {
            Therapy::None => baseline,
            Therapy::Anticoagulant => {
                baseline.risk_adjusted(inputs.rr_stroke, inputs.rr_bleeding)?
            }
        };

        let annual_treatment_cost = match therapy {
            Therapy::None => 0.0,
            Therapy::Anticoagulant => inputs.annual_anticoagulant_cost,
        };

        Ok(Self {
            therapy,
            initial_state: inputs.initial_state,
            delta_t: inputs.delta_t,
            adj_discount_rate: inputs.discount_rate * inputs.delta_t,
            matrix,
            annual_state_costs: inputs.annual_state_costs,
            annual_state_utilities: inputs.annual_state_utilities,
            annual_treatment_cost,
        })
    }

    /// Selected therapy
    pub fn therapy(&self) -> Therapy {
        self.therapy
    }

    /// State every patient starts in
    pub fn initial_state(&self) -> HealthState {
        self.initial_state
    }

    /// Length of one time step
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Discount rate per step (annual rate × Δt)
    pub fn adj_discount_rate(&self) -> f64 {
        self.adj_discount_rate
    }

    /// Transition probability row out of `state`
    pub fn transition_row(&self, state: HealthState) -> &[f64; STATE_COUNT] {
        self.matrix.row(state)
    }

    /// The full therapy matrix
    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Annual cost of occupying `state`; the Dead state always costs zero
    /// regardless of the input table.
    pub fn annual_state_cost(&self, state: HealthState) -> f64 {
        if state.is_dead() {
            0.0
        } else {
            self.annual_state_costs[state.index()]
        }
    }

    /// Annual utility of occupying `state`; zero for Dead regardless of the
    /// input table.
    pub fn annual_state_utility(&self, state: HealthState) -> f64 {
        if state.is_dead() {
            0.0
        } else {
            self.annual_state_utilities[state.index()]
        }
    }

    /// Annual treatment cost of the selected therapy
    pub fn annual_treatment_cost(&self) -> f64 {
        self.annual_treatment_cost
    }
}
