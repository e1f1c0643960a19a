//! Cohort outcome aggregation
//!
//! Reduces the per-patient outcome records to the vectors, survival curve,
//! and summary statistics the reporting layer consumes. Everything is copied
//! by value; nothing here references the simulated patients.

use serde::Serialize;
use thiserror::Error;

use crate::models::outcome::PatientOutcome;
use crate::stats::SummaryStat;

/// Aggregation was attempted over data that does not exist.
///
/// Surfaced as an explicit error so callers can distinguish "no data" from
/// "zero effect"; never reported as a silent NaN or zero.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmptyOutcomeSetError {
    #[error("cannot aggregate outcomes for an empty cohort")]
    NoPatients,

    #[error("no deaths were recorded within the simulation horizon; survival statistics are undefined")]
    NoDeaths,
}

/// One point of the population-alive-over-time curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalCurvePoint {
    pub time: f64,
    pub alive: usize,
}

/// Number of patients still alive over time.
///
/// Starts at the initial population at time 0; each death is a single
/// decrement at its recorded survival time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalCurve {
    points: Vec<SurvivalCurvePoint>,
}

impl SurvivalCurve {
    fn from_death_times(initial_population: usize, death_times: &[f64]) -> Self {
        let mut times = death_times.to_vec();
        times.sort_by(f64::total_cmp);

        let mut points = Vec::with_capacity(times.len() + 1);
        points.push(SurvivalCurvePoint {
            time: 0.0,
            alive: initial_population,
        });

        let mut alive = initial_population;
        for &time in &times {
            alive -= 1;
            points.push(SurvivalCurvePoint { time, alive });
        }

        Self { points }
    }

    pub fn points(&self) -> &[SurvivalCurvePoint] {
        &self.points
    }

    /// Population still alive at `time` (deaths at exactly `time` have
    /// already been decremented).
    pub fn alive_at(&self, time: f64) -> usize {
        self.points
            .iter()
            .take_while(|point| point.time <= time)
            .last()
            .map(|point| point.alive)
            .unwrap_or(self.points[0].alive)
    }
}

/// Immutable summary of one simulated cohort.
#[derive(Debug, Clone, Serialize)]
pub struct CohortOutcomes {
    initial_population: usize,
    patient_outcomes: Vec<PatientOutcome>,
    survival_times: Vec<f64>,
    stroke_counts: Vec<u32>,
    costs: Vec<f64>,
    utilities: Vec<f64>,
    survival_curve: SurvivalCurve,
    /// Present only when at least one patient died within the horizon
    survival_time_stat: Option<SummaryStat>,
    stroke_count_stat: SummaryStat,
    cost_stat: SummaryStat,
    utility_stat: SummaryStat,
}

impl CohortOutcomes {
    /// Aggregate the records of a fully simulated cohort.
    pub fn from_patient_outcomes(
        initial_population: usize,
        patient_outcomes: Vec<PatientOutcome>,
    ) -> Result<Self, EmptyOutcomeSetError> {
        if patient_outcomes.is_empty() {
            return Err(EmptyOutcomeSetError::NoPatients);
        }

        let survival_times: Vec<f64> = patient_outcomes
            .iter()
            .filter_map(|outcome| outcome.survival_time)
            .collect();
        let stroke_counts: Vec<u32> = patient_outcomes
            .iter()
            .map(|outcome| outcome.stroke_count)
            .collect();
        let costs: Vec<f64> = patient_outcomes
            .iter()
            .map(|outcome| outcome.discounted_cost)
            .collect();
        let utilities: Vec<f64> = patient_outcomes
            .iter()
            .map(|outcome| outcome.discounted_utility)
            .collect();

        let survival_curve = SurvivalCurve::from_death_times(initial_population, &survival_times);

        let stroke_values: Vec<f64> = stroke_counts.iter().map(|&count| count as f64).collect();

        let survival_time_stat = SummaryStat::new("survival time", &survival_times);
        let stroke_count_stat = SummaryStat::new("stroke count", &stroke_values)
            .ok_or(EmptyOutcomeSetError::NoPatients)?;
        let cost_stat = SummaryStat::new("discounted cost", &costs)
            .ok_or(EmptyOutcomeSetError::NoPatients)?;
        let utility_stat = SummaryStat::new("discounted utility", &utilities)
            .ok_or(EmptyOutcomeSetError::NoPatients)?;

        Ok(Self {
            initial_population,
            patient_outcomes,
            survival_times,
            stroke_counts,
            costs,
            utilities,
            survival_curve,
            survival_time_stat,
            stroke_count_stat,
            cost_stat,
            utility_stat,
        })
    }

    pub fn initial_population(&self) -> usize {
        self.initial_population
    }

    /// All per-patient records, in patient order.
    pub fn patient_outcomes(&self) -> &[PatientOutcome] {
        &self.patient_outcomes
    }

    /// Survival times of the patients who died within the horizon.
    pub fn survival_times(&self) -> &[f64] {
        &self.survival_times
    }

    /// Number of patients who died within the horizon.
    pub fn deaths(&self) -> usize {
        self.survival_times.len()
    }

    pub fn stroke_counts(&self) -> &[u32] {
        &self.stroke_counts
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn utilities(&self) -> &[f64] {
        &self.utilities
    }

    pub fn survival_curve(&self) -> &SurvivalCurve {
        &self.survival_curve
    }

    /// Survival-time statistic; an error when no patient died within the
    /// horizon.
    pub fn survival_time_stat(&self) -> Result<&SummaryStat, EmptyOutcomeSetError> {
        self.survival_time_stat
            .as_ref()
            .ok_or(EmptyOutcomeSetError::NoDeaths)
    }

    pub fn stroke_count_stat(&self) -> &SummaryStat {
        &self.stroke_count_stat
    }

    pub fn cost_stat(&self) -> &SummaryStat {
        &self.cost_stat
    }

    pub fn utility_stat(&self) -> &SummaryStat {
        &self.utility_stat
    }
}
