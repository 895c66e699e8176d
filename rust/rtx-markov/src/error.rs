//! Error types for the path scorer.

use thiserror::Error;

use crate::state::State;

#[derive(Debug, Error)]
pub enum MarkovError {
    #[error("state ({}, {}) is not in the state space", .0.relationship, .0.label)]
    UnknownState(State),

    #[error("pseudo-count must be finite and non-negative, got {0}")]
    InvalidPseudoCount(f64),

    #[error("transition matrix is not {states} by {states}")]
    Shape { states: usize },

    #[error("malformed model: {0}")]
    Json(#[from] serde_json::Error),
}
