//! Half-cycle-corrected cost and utility accrual
//!
//! Each step contributes the trapezoidal average of its endpoint states'
//! annual values, plus the treatment cost (halved in the cycle of death),
//! discounted back to time zero at the half-step rate over `2k + 1` periods.
//! Increments are discounted independently; errors never compound across
//! steps.

use crate::models::health_state::HealthState;
use crate::params::TherapyParameters;

/// Present value of `amount` discounted at `periodic_rate` over `periods`
/// compounding periods.
fn present_value(amount: f64, periodic_rate: f64, periods: i32) -> f64 {
    amount / (1.0 + periodic_rate).powi(periods)
}

/// Running totals of one patient's discounted cost and utility.
#[derive(Debug, Clone, Default)]
pub struct CostUtilityAccumulator {
    total_discounted_cost: f64,
    total_discounted_utility: f64,
}

impl CostUtilityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the contribution of step `k`, transitioning `current` → `next`.
    ///
    /// The base cost and utility average the two endpoint states over the
    /// step. Treatment is credited for the full step unless the step ends in
    /// death, where only half a step of treatment is credited (half-cycle
    /// correction). Both increments are discounted at half the adjusted rate
    /// over `2k + 1` periods, which lands the valuation point at the middle
    /// of the step.
    pub fn record_step(
        &mut self,
        k: usize,
        current: HealthState,
        next: HealthState,
        params: &TherapyParameters,
    ) {
        let delta_t = params.delta_t();

        let mut cost = 0.5
            * (params.annual_state_cost(current) + params.annual_state_cost(next))
            * delta_t;
        let utility = 0.5
            * (params.annual_state_utility(current) + params.annual_state_utility(next))
            * delta_t;

        if next.is_dead() {
            cost += 0.5 * params.annual_treatment_cost() * delta_t;
        } else {
            cost += params.annual_treatment_cost() * delta_t;
        }

        let periodic_rate = params.adj_discount_rate() / 2.0;
        let periods = (2 * k + 1) as i32;
        self.total_discounted_cost += present_value(cost, periodic_rate, periods);
        self.total_discounted_utility += present_value(utility, periodic_rate, periods);
    }

    pub fn total_discounted_cost(&self) -> f64 {
        self.total_discounted_cost
    }

    pub fn total_discounted_utility(&self) -> f64 {
        self.total_discounted_utility
    }
}
