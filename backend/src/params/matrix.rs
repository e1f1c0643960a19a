//! Row-stochastic transition matrix with fail-fast validation
//!
//! A `TransitionMatrix` can only be obtained through [`from_rows`], which
//! rejects malformed probability data instead of normalizing it, so every
//! instance in the program is valid by construction. The anticoagulation
//! variant is derived from the baseline through [`risk_adjusted`], which
//! re-validates the result; an out-of-range relative risk therefore fails at
//! parameter construction, before any patient is simulated.
//!
//! [`from_rows`]: TransitionMatrix::from_rows
//! [`risk_adjusted`]: TransitionMatrix::risk_adjusted

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::health_state::{HealthState, STATE_COUNT};

/// Tolerance for row-sum and absorbing-state checks.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Errors raised when probability data fails validation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidMatrixError {
    #[error("transition row for {state:?} sums to {sum} (expected 1.0)")]
    RowSumMismatch { state: HealthState, sum: f64 },

    #[error("negative transition probability {probability} from {from:?} to {to:?}")]
    NegativeProbability {
        from: HealthState,
        to: HealthState,
        probability: f64,
    },

    #[error("{state:?} must be absorbing (unit self-loop), found {probability} on the diagonal")]
    NonAbsorbingTerminal {
        state: HealthState,
        probability: f64,
    },
}

/// Square row-stochastic matrix indexed by `[from][to]` under the canonical
/// state ordering. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    rows: [[f64; STATE_COUNT]; STATE_COUNT],
}

impl TransitionMatrix {
    /// Validate and wrap raw probability rows.
    ///
    /// Checks, in order: no negative entries, every row sums to 1.0 within
    /// [`PROBABILITY_TOLERANCE`], and the Dead row is the unit self-loop.
    ///
    /// # Example
    /// ```
    /// use therapy_simulator_core_rs::{StudyInputs, TransitionMatrix};
    ///
    /// let inputs = StudyInputs::default();
    /// let matrix = TransitionMatrix::from_rows(inputs.transition_matrix).unwrap();
    /// assert_eq!(matrix.rows()[0][0], 0.75);
    /// ```
    pub fn from_rows(
        rows: [[f64; STATE_COUNT]; STATE_COUNT],
    ) -> Result<Self, InvalidMatrixError> {
        for from in HealthState::ALL {
            let row = &rows[from.index()];

            for to in HealthState::ALL {
                let probability = row[to.index()];
                if probability < 0.0 {
                    return Err(InvalidMatrixError::NegativeProbability {
                        from,
                        to,
                        probability,
                    });
                }
            }

            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(InvalidMatrixError::RowSumMismatch { state: from, sum });
            }
        }

        // The terminal state is never left once entered.
        let dead = HealthState::Dead.index();
        let self_loop = rows[dead][dead];
        if (self_loop - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(InvalidMatrixError::NonAbsorbingTerminal {
                state: HealthState::Dead,
                probability: self_loop,
            });
        }

        Ok(Self { rows })
    }

    /// Probability row out of `state`.
    pub fn row(&self, state: HealthState) -> &[f64; STATE_COUNT] {
        &self.rows[state.index()]
    }

    /// Single transition probability.
    pub fn probability(&self, from: HealthState, to: HealthState) -> f64 {
        self.rows[from.index()][to.index()]
    }

    /// All rows, for inspection and tests.
    pub fn rows(&self) -> &[[f64; STATE_COUNT]; STATE_COUNT] {
        &self.rows
    }

    /// Derive the anticoagulation matrix from this baseline.
    ///
    /// Only the Post-Stroke row changes: the probability of a recurrent
    /// stroke is scaled by `rr_stroke`, the probability of death is scaled
    /// by `rr_stroke × rr_bleeding` (bleeding raises competing-harm
    /// mortality), and the self-transition entry is recomputed as the
    /// complement of every other entry so the row still sums to 1.0. All
    /// other rows are copied bit-identically. The result is re-validated,
    /// so relative risks large enough to push the complement negative fail
    /// here rather than corrupting a simulation.
    pub fn risk_adjusted(
        &self,
        rr_stroke: f64,
        rr_bleeding: f64,
    ) -> Result<TransitionMatrix, InvalidMatrixError> {
        let mut rows = self.rows;
        let post_stroke = HealthState::PostStroke.index();
        let stroke = HealthState::Stroke.index();
        let dead = HealthState::Dead.index();

        rows[post_stroke][stroke] = rr_stroke * self.rows[post_stroke][stroke];
        rows[post_stroke][dead] = rr_stroke * rr_bleeding * self.rows[post_stroke][dead];

        let off_diagonal: f64 = rows[post_stroke]
            .iter()
            .enumerate()
            .filter(|(to, _)| *to != post_stroke)
            .map(|(_, probability)| probability)
            .sum();
        rows[post_stroke][post_stroke] = 1.0 - off_diagonal;

        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn baseline_rows() -> [[f64; STATE_COUNT]; STATE_COUNT] {
        [
            [0.75, 0.15, 0.0, 0.1],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.25, 0.55, 0.2],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_valid_rows_accepted() {
        assert!(TransitionMatrix::from_rows(baseline_rows()).is_ok());
    }

    #[test]
    fn test_row_sum_mismatch_rejected() {
        let mut rows = baseline_rows();
        rows[0][0] = 0.5; // row now sums to 0.75
        let err = TransitionMatrix::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            InvalidMatrixError::RowSumMismatch {
                state: HealthState::Well,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_probability_rejected() {
        let mut rows = baseline_rows();
        rows[0][0] = -0.1;
        rows[0][1] = 1.0;
        let err = TransitionMatrix::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            InvalidMatrixError::NegativeProbability {
                from: HealthState::Well,
                to: HealthState::Well,
                ..
            }
        ));
    }

    #[test]
    fn test_non_absorbing_dead_row_rejected() {
        let mut rows = baseline_rows();
        rows[3] = [0.5, 0.0, 0.0, 0.5];
        let err = TransitionMatrix::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            InvalidMatrixError::NonAbsorbingTerminal {
                state: HealthState::Dead,
                ..
            }
        ));
    }

    #[test]
    fn test_risk_adjusted_post_stroke_row() {
        let baseline = TransitionMatrix::from_rows(baseline_rows()).unwrap();
        let adjusted = baseline.risk_adjusted(0.65, 1.05).unwrap();

        let row = adjusted.row(HealthState::PostStroke);
        assert!((row[HealthState::Stroke.index()] - 0.65 * 0.25).abs() < 1e-12);
        assert!((row[HealthState::Dead.index()] - 0.65 * 1.05 * 0.2).abs() < 1e-12);
        let expected_self = 1.0 - 0.65 * 0.25 - 0.65 * 1.05 * 0.2;
        assert!((row[HealthState::PostStroke.index()] - expected_self).abs() < 1e-12);
    }

    #[test]
    fn test_risk_adjusted_leaves_other_rows_bit_identical() {
        let baseline = TransitionMatrix::from_rows(baseline_rows()).unwrap();
        let adjusted = baseline.risk_adjusted(0.65, 1.05).unwrap();

        for state in [HealthState::Well, HealthState::Stroke, HealthState::Dead] {
            for to in HealthState::ALL {
                assert_eq!(
                    baseline.probability(state, to).to_bits(),
                    adjusted.probability(state, to).to_bits(),
                    "row for {:?} must not change",
                    state
                );
            }
        }
    }

    #[test]
    fn test_excessive_relative_risk_fails_fast() {
        let baseline = TransitionMatrix::from_rows(baseline_rows()).unwrap();
        // 0.25 × 3 + 0.2 × 3 × 2 = 1.95 > 1, so the complement goes negative.
        let err = baseline.risk_adjusted(3.0, 2.0).unwrap_err();
        assert!(matches!(
            err,
            InvalidMatrixError::NegativeProbability {
                from: HealthState::PostStroke,
                to: HealthState::PostStroke,
                ..
            }
        ));
    }

    proptest! {
        #[test]
        fn prop_risk_adjustment_is_total(
            rr_stroke in 0.0f64..3.0,
            rr_bleeding in 0.0f64..3.0,
        ) {
            let baseline = TransitionMatrix::from_rows(baseline_rows()).unwrap();
            if let Ok(adjusted) = baseline.risk_adjusted(rr_stroke, rr_bleeding) {
                for state in HealthState::ALL {
                    let row = adjusted.row(state);
                    let sum: f64 = row.iter().sum();
                    prop_assert!((sum - 1.0).abs() <= PROBABILITY_TOLERANCE);
                    for &probability in row {
                        prop_assert!(probability >= 0.0);
                        prop_assert!(probability <= 1.0 + PROBABILITY_TOLERANCE);
                    }
                }
            }
        }
    }
}
