//! Integration tests for therapy-dependent matrix derivation
//!
//! Tests cover:
//! - Row-stochastic properties under every therapy
//! - Bit-identical unaffected rows after risk adjustment
//! - Fail-fast construction on malformed probability data

use therapy_simulator_core_rs::{
    HealthState, InvalidMatrixError, StudyInputs, Therapy, TherapyParameters,
};

#[test]
fn test_every_therapy_matrix_is_row_stochastic() {
    let inputs = StudyInputs::default();

    for therapy in [Therapy::None, Therapy::Anticoagulant] {
        let params = TherapyParameters::new(therapy, &inputs).unwrap();
        for state in HealthState::ALL {
            let row = params.transition_row(state);
            let sum: f64 = row.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "{:?} row under {:?} sums to {}",
                state,
                therapy,
                sum
            );
            for &probability in row {
                assert!((0.0..=1.0).contains(&probability));
            }
        }
    }
}

#[test]
fn test_risk_adjustment_touches_only_the_post_stroke_row() {
    let inputs = StudyInputs::default();
    let baseline = TherapyParameters::new(Therapy::None, &inputs).unwrap();
    let adjusted = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap();

    for state in [HealthState::Well, HealthState::Stroke, HealthState::Dead] {
        let base_row = baseline.transition_row(state);
        let adj_row = adjusted.transition_row(state);
        for (base, adj) in base_row.iter().zip(adj_row) {
            assert_eq!(base.to_bits(), adj.to_bits());
        }
    }
}

#[test]
fn test_adjusted_post_stroke_row_values() {
    let inputs = StudyInputs::default();
    let params = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap();
    let row = params.transition_row(HealthState::PostStroke);

    let stroke = 0.65 * 0.25;
    let dead = 0.65 * 1.05 * 0.2;
    assert!((row[HealthState::Stroke.index()] - stroke).abs() < 1e-12);
    assert!((row[HealthState::Dead.index()] - dead).abs() < 1e-12);
    assert!((row[HealthState::PostStroke.index()] - (1.0 - stroke - dead)).abs() < 1e-12);
    assert_eq!(row[HealthState::Well.index()], 0.0);
}

#[test]
fn test_derivation_is_deterministic() {
    let inputs = StudyInputs::default();
    let a = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap();
    let b = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap();
    assert_eq!(a.matrix(), b.matrix());
}

#[test]
fn test_malformed_row_sum_fails_construction() {
    let mut inputs = StudyInputs::default();
    inputs.transition_matrix[0] = [0.75, 0.15, 0.0, 0.05]; // sums to 0.95

    let err = TherapyParameters::new(Therapy::None, &inputs).unwrap_err();
    assert!(matches!(
        err,
        InvalidMatrixError::RowSumMismatch {
            state: HealthState::Well,
            ..
        }
    ));
}

#[test]
fn test_negative_probability_fails_construction() {
    let mut inputs = StudyInputs::default();
    inputs.transition_matrix[0] = [0.85, 0.25, 0.0, -0.1];

    let err = TherapyParameters::new(Therapy::None, &inputs).unwrap_err();
    assert!(matches!(err, InvalidMatrixError::NegativeProbability { .. }));
}

#[test]
fn test_non_absorbing_dead_row_fails_construction() {
    let mut inputs = StudyInputs::default();
    inputs.transition_matrix[HealthState::Dead.index()] = [0.1, 0.0, 0.0, 0.9];

    let err = TherapyParameters::new(Therapy::None, &inputs).unwrap_err();
    assert!(matches!(
        err,
        InvalidMatrixError::NonAbsorbingTerminal {
            state: HealthState::Dead,
            ..
        }
    ));
}

#[test]
fn test_oversized_relative_risk_fails_instead_of_normalizing() {
    let mut inputs = StudyInputs::default();
    inputs.rr_stroke = 3.0;
    inputs.rr_bleeding = 2.0;

    // 0.25 × 3 + 0.2 × 6 = 1.95 of probability mass; the complement would be
    // negative, and the derivation must reject it rather than rescale.
    let err = TherapyParameters::new(Therapy::Anticoagulant, &inputs).unwrap_err();
    assert!(matches!(err, InvalidMatrixError::NegativeProbability { .. }));
}
