//! Cohort simulation loop
//!
//! A `Cohort` is one population simulated under one therapy: N patients
//! sharing a single read-only `TherapyParameters`, each with a private draw
//! source seeded by the documented contract
//! `patient_id = cohort_id × population_size + patient_index`.
//!
//! Patients are mutually independent (no shared mutable state), so the
//! sequential loop below is a scheduling choice, not a correctness
//! requirement; a worker pool with one task per patient would be equally
//! valid given the same seeds and a join before aggregation.

use log::{debug, info};
use thiserror::Error;

use crate::cohort::outcomes::{CohortOutcomes, EmptyOutcomeSetError};
use crate::models::therapy::Therapy;
use crate::params::{InvalidMatrixError, StudyInputs, TherapyParameters};
use crate::patient::{Patient, UnreachableStateError};

/// Simulation error types
///
/// All variants are deterministic configuration/logic errors detected at
/// construction or first use; none are transient, so nothing is retried.
/// Construction fails before any patient is simulated, so a malformed
/// configuration never produces partially-correct statistics.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Study-input validation error
    #[error("invalid study inputs: {0}")]
    InvalidInputs(String),

    #[error(transparent)]
    InvalidMatrix(#[from] InvalidMatrixError),

    #[error(transparent)]
    UnreachableState(#[from] UnreachableStateError),

    #[error(transparent)]
    EmptyOutcomes(#[from] EmptyOutcomeSetError),
}

/// One population simulated under one therapy.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::{Cohort, StudyInputs, Therapy};
///
/// let mut inputs = StudyInputs::default();
/// inputs.population_size = 25;
/// inputs.sim_length = 10.0;
///
/// let cohort = Cohort::new(0, Therapy::None, &inputs).unwrap();
/// let outcomes = cohort.simulate().unwrap();
/// assert_eq!(outcomes.patient_outcomes().len(), 25);
/// ```
#[derive(Debug)]
pub struct Cohort {
    id: u64,
    sim_length: f64,
    params: TherapyParameters,
    patients: Vec<Patient>,
}

impl Cohort {
    /// Build a cohort from validated study inputs.
    ///
    /// Validates the inputs, derives the therapy parameters (fail-fast on a
    /// malformed matrix), and creates the patient population with the
    /// deterministic seed contract.
    pub fn new(id: u64, therapy: Therapy, inputs: &StudyInputs) -> Result<Self, SimulationError> {
        Self::validate_inputs(inputs)?;

        let params = TherapyParameters::new(therapy, inputs)?;

        let population_size = inputs.population_size as u64;
        let patients: Vec<Patient> = (0..inputs.population_size)
            .map(|index| Patient::new(id * population_size + index as u64, params.initial_state()))
            .collect();

        Ok(Self {
            id,
            sim_length: inputs.sim_length,
            params,
            patients,
        })
    }

    /// Validate study inputs
    fn validate_inputs(inputs: &StudyInputs) -> Result<(), SimulationError> {
        if inputs.population_size == 0 {
            return Err(SimulationError::InvalidInputs(
                "population_size must be > 0".to_string(),
            ));
        }

        if inputs.sim_length <= 0.0 {
            return Err(SimulationError::InvalidInputs(
                "sim_length must be > 0".to_string(),
            ));
        }

        if inputs.delta_t <= 0.0 || inputs.delta_t > inputs.sim_length {
            return Err(SimulationError::InvalidInputs(
                "delta_t must be > 0 and no longer than sim_length".to_string(),
            ));
        }

        if inputs.alpha <= 0.0 || inputs.alpha >= 1.0 {
            return Err(SimulationError::InvalidInputs(
                "alpha must lie strictly between 0 and 1".to_string(),
            ));
        }

        if inputs.discount_rate < 0.0 {
            return Err(SimulationError::InvalidInputs(
                "discount_rate must be >= 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn therapy(&self) -> Therapy {
        self.params.therapy()
    }

    pub fn population_size(&self) -> usize {
        self.patients.len()
    }

    /// Run every patient to completion and aggregate the outcomes.
    ///
    /// Consumes the cohort: outcomes are copied out by value and the
    /// patients are discarded.
    pub fn simulate(mut self) -> Result<CohortOutcomes, SimulationError> {
        info!(
            "simulating cohort {} ({:?}, {} patients, horizon {})",
            self.id,
            self.params.therapy(),
            self.patients.len(),
            self.sim_length
        );

        let population = self.patients.len();
        let mut outcomes = Vec::with_capacity(population);
        for patient in &mut self.patients {
            patient.simulate(&self.params, self.sim_length)?;
            outcomes.push(patient.outcome());
        }

        let aggregated = CohortOutcomes::from_patient_outcomes(population, outcomes)?;
        debug!(
            "cohort {} finished: {} of {} patients died within the horizon",
            self.id,
            aggregated.deaths(),
            population
        );
        Ok(aggregated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_population_rejected() {
        let mut inputs = StudyInputs::default();
        inputs.population_size = 0;
        let err = Cohort::new(0, Therapy::None, &inputs).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInputs(_)));
    }

    #[test]
    fn test_step_longer_than_horizon_rejected() {
        let mut inputs = StudyInputs::default();
        inputs.delta_t = 10.0;
        inputs.sim_length = 5.0;
        let err = Cohort::new(0, Therapy::None, &inputs).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInputs(_)));
    }

    #[test]
    fn test_alpha_bounds_rejected() {
        for alpha in [0.0, 1.0, -0.2, 1.5] {
            let mut inputs = StudyInputs::default();
            inputs.alpha = alpha;
            let err = Cohort::new(0, Therapy::None, &inputs).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidInputs(_)));
        }
    }

    #[test]
    fn test_malformed_matrix_fails_before_simulation() {
        let mut inputs = StudyInputs::default();
        inputs.transition_matrix[0] = [0.5, 0.0, 0.0, 0.1];
        let err = Cohort::new(0, Therapy::None, &inputs).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidMatrix(_)));
    }

    #[test]
    fn test_patient_ids_follow_seed_contract() {
        let mut inputs = StudyInputs::default();
        inputs.population_size = 10;
        let cohort = Cohort::new(7, Therapy::None, &inputs).unwrap();
        let ids: Vec<u64> = cohort.patients.iter().map(|p| p.id()).collect();
        assert_eq!(ids, (70..80).collect::<Vec<u64>>());
    }
}
