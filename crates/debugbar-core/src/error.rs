#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures surfaced by the few fallible core operations.
///
/// The widget layer itself never fails; these only come out of decoding
/// data that crossed a host boundary (persisted settings, JSON payloads).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("value is not representable as JSON: {reason}")]
    Unrepresentable { reason: String },
}

impl CoreError {
    #[must_use]
    pub fn unrepresentable(reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            reason: reason.into(),
        }
    }
}
