//! Health states of the stroke disease process
//!
//! The model is a discrete-time Markov chain over a closed, totally ordered
//! set of states. `Dead` is the unique absorbing terminal state: its
//! transition row must be the unit self-loop, and it reports zero annual cost
//! and utility regardless of the input tables.
//!
//! # Index mapping
//!
//! States map to array indices through the single canonical ordering table
//! [`HealthState::ALL`]. Every probability, cost, and utility array in the
//! crate is indexed by this ordering; there is no other mapping.

use serde::{Deserialize, Serialize};

/// Number of health states in the model.
pub const STATE_COUNT: usize = 4;

/// A patient occupies exactly one health state at any instant.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::HealthState;
///
/// assert_eq!(HealthState::PostStroke.index(), 2);
/// assert_eq!(HealthState::from_index(2), Some(HealthState::PostStroke));
/// assert_eq!(HealthState::from_index(9), None);
/// assert!(HealthState::Dead.is_dead());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    /// No stroke history
    Well,
    /// Acute stroke event
    Stroke,
    /// Survived a stroke; at elevated risk of recurrence
    PostStroke,
    /// Absorbing terminal state
    Dead,
}

impl HealthState {
    /// Canonical ordering: position in this table IS the array index.
    pub const ALL: [HealthState; STATE_COUNT] = [
        HealthState::Well,
        HealthState::Stroke,
        HealthState::PostStroke,
        HealthState::Dead,
    ];

    /// Array index of this state under the canonical ordering.
    pub fn index(self) -> usize {
        match self {
            HealthState::Well => 0,
            HealthState::Stroke => 1,
            HealthState::PostStroke => 2,
            HealthState::Dead => 3,
        }
    }

    /// Inverse of [`index`](Self::index); `None` for indices outside the
    /// state space.
    pub fn from_index(index: usize) -> Option<HealthState> {
        HealthState::ALL.get(index).copied()
    }

    /// Whether this is the absorbing terminal state.
    pub fn is_dead(self) -> bool {
        self == HealthState::Dead
    }
}
