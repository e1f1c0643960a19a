//! Patient-level stochastic state machine
//!
//! One `Patient` is driven through repeated Markov transitions until death
//! is recorded or the simulation horizon is exceeded:
//!
//! ```text
//! For each step k while no death recorded and k × Δt < sim_length:
//! 1. Query the transition row of the current state
//! 2. Sample the next state from the patient's private draw source
//! 3. On a transition into Dead, record survival = (k + 0.5) × Δt
//! 4. Count Stroke occupancy at the start of the step
//! 5. Accrue this step's discounted cost and utility
//! 6. Advance to the next state
//! ```
//!
//! # Determinism
//!
//! The draw source is seeded with the patient id, so a run is a pure
//! function of `(patient_id, parameters, sim_length)`.

pub mod cost_utility;

use thiserror::Error;

use crate::models::health_state::HealthState;
use crate::models::outcome::PatientOutcome;
use crate::params::TherapyParameters;
use crate::rng::{EmpiricalDistribution, RngManager};

pub use cost_utility::CostUtilityAccumulator;

/// A sampled index fell outside the declared state space.
///
/// Indicates a contract violation between the draw source and the
/// probability-row wiring; fatal, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sampled state index {index} falls outside the declared state space")]
pub struct UnreachableStateError {
    pub index: usize,
}

/// Tracks one patient's state and outcomes across the run.
#[derive(Debug, Clone)]
pub struct PatientStateMonitor {
    current_state: HealthState,
    survival_time: Option<f64>,
    stroke_count: u32,
    cost_utility: CostUtilityAccumulator,
}

impl PatientStateMonitor {
    pub fn new(initial_state: HealthState) -> Self {
        Self {
            current_state: initial_state,
            survival_time: None,
            stroke_count: 0,
            cost_utility: CostUtilityAccumulator::new(),
        }
    }

    /// Whether a death has been recorded yet.
    ///
    /// A patient created in the Dead state still counts as "alive" here
    /// until its first (Dead → Dead) transition records the death, which
    /// credits the half-cycle survival time and the single terminal step's
    /// accrual.
    pub fn is_alive(&self) -> bool {
        self.survival_time.is_none()
    }

    pub fn current_state(&self) -> HealthState {
        self.current_state
    }

    /// Apply the sampled transition for step `k`.
    pub fn record_transition(
        &mut self,
        k: usize,
        next_state: HealthState,
        params: &TherapyParameters,
    ) {
        if next_state.is_dead() {
            // Half-cycle correction: credit half a step of survival in the
            // interval where death occurred.
            self.survival_time = Some((k as f64 + 0.5) * params.delta_t());
        }

        // Occupancy counting: time spent in Stroke at the start of each
        // step, not new-onset events.
        if self.current_state == HealthState::Stroke {
            self.stroke_count += 1;
        }

        self.cost_utility
            .record_step(k, self.current_state, next_state, params);

        self.current_state = next_state;
    }

    pub fn survival_time(&self) -> Option<f64> {
        self.survival_time
    }

    pub fn stroke_count(&self) -> u32 {
        self.stroke_count
    }

    pub fn total_discounted_cost(&self) -> f64 {
        self.cost_utility.total_discounted_cost()
    }

    pub fn total_discounted_utility(&self) -> f64 {
        self.cost_utility.total_discounted_utility()
    }
}

/// One simulated patient with a private, deterministically seeded draw
/// source.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::{Patient, StudyInputs, Therapy, TherapyParameters};
///
/// let inputs = StudyInputs::default();
/// let params = TherapyParameters::new(Therapy::None, &inputs).unwrap();
///
/// let mut patient = Patient::new(17, params.initial_state());
/// patient.simulate(&params, inputs.sim_length).unwrap();
/// let outcome = patient.outcome();
/// assert_eq!(outcome.patient_id, 17);
/// ```
#[derive(Debug, Clone)]
pub struct Patient {
    id: u64,
    rng: RngManager,
    monitor: PatientStateMonitor,
}

impl Patient {
    /// Create a patient; `id` seeds the private draw source.
    pub fn new(id: u64, initial_state: HealthState) -> Self {
        Self {
            id,
            rng: RngManager::new(id),
            monitor: PatientStateMonitor::new(initial_state),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Run the state machine to completion.
    ///
    /// A patient who survives to the horizon has no recorded survival time.
    pub fn simulate(
        &mut self,
        params: &TherapyParameters,
        sim_length: f64,
    ) -> Result<(), UnreachableStateError> {
        let mut k: usize = 0;

        while self.monitor.is_alive() && (k as f64) * params.delta_t() < sim_length {
            let row = params.transition_row(self.monitor.current_state());
            let distribution = EmpiricalDistribution::new(row);
            let index = distribution.sample(&mut self.rng);
            let next_state =
                HealthState::from_index(index).ok_or(UnreachableStateError { index })?;

            self.monitor.record_transition(k, next_state, params);
            k += 1;
        }

        Ok(())
    }

    /// Extract the outcome record; the patient can be discarded afterwards.
    pub fn outcome(&self) -> PatientOutcome {
        PatientOutcome {
            patient_id: self.id,
            survival_time: self.monitor.survival_time(),
            stroke_count: self.monitor.stroke_count(),
            discounted_cost: self.monitor.total_discounted_cost(),
            discounted_utility: self.monitor.total_discounted_utility(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::therapy::Therapy;
    use crate::params::StudyInputs;

    #[test]
    fn test_transition_into_dead_records_half_cycle_survival() {
        let inputs = StudyInputs::default();
        let params = TherapyParameters::new(Therapy::None, &inputs).unwrap();

        let mut monitor = PatientStateMonitor::new(HealthState::Well);
        monitor.record_transition(3, HealthState::Dead, &params);

        assert_eq!(monitor.survival_time(), Some(3.5));
        assert!(!monitor.is_alive());
    }

    #[test]
    fn test_stroke_occupancy_counted_at_step_start() {
        let inputs = StudyInputs::default();
        let params = TherapyParameters::new(Therapy::None, &inputs).unwrap();

        let mut monitor = PatientStateMonitor::new(HealthState::Well);
        // Entering Stroke does not count; leaving from it does.
        monitor.record_transition(0, HealthState::Stroke, &params);
        assert_eq!(monitor.stroke_count(), 0);
        monitor.record_transition(1, HealthState::PostStroke, &params);
        assert_eq!(monitor.stroke_count(), 1);
    }

    #[test]
    fn test_horizon_survivor_has_no_survival_time() {
        let mut inputs = StudyInputs::default();
        // Nobody ever leaves Well.
        inputs.transition_matrix = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.25, 0.55, 0.2],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let params = TherapyParameters::new(Therapy::None, &inputs).unwrap();

        let mut patient = Patient::new(5, params.initial_state());
        patient.simulate(&params, 10.0).unwrap();

        let outcome = patient.outcome();
        assert_eq!(outcome.survival_time, None);
        assert_eq!(outcome.stroke_count, 0);
    }
}
