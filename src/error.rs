//! Error types for Fittrace

use thiserror::Error;

/// Errors that can occur during computation
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("unknown workout code: {0}")]
    UnknownWorkoutCode(String),

    #[error("workout code {code} expects {expected} sensor values, got {got}")]
    ArityMismatch {
        code: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid {field}: {value} (must be a positive finite number)")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("invalid sensor packet: {0}")]
    InvalidPacket(String),

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
