//! Treatment policies
//!
//! Selecting a therapy deterministically determines the transition-matrix
//! variant, the annual treatment cost, and (indirectly) the relative risks
//! applied to the baseline matrix. See `params` for the derivation.

use serde::{Deserialize, Serialize};

/// Closed enumeration of the interventions under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Therapy {
    /// No treatment: baseline transition matrix, zero treatment cost
    None,
    /// Anticoagulation: risk-adjusted Post-Stroke row, annual drug cost
    Anticoagulant,
}

impl Therapy {
    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Therapy::None => "No treatment",
            Therapy::Anticoagulant => "Anticoagulation treatment",
        }
    }
}
