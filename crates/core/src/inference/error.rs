//! Error types for schema inference
//!
//! Inference over decoded values never fails; only parsing raw text can.

use thiserror::Error;

/// Errors that can occur while preparing input for inference
#[derive(Error, Debug, Clone)]
pub enum InferenceError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for InferenceError {
    fn from(e: serde_json::Error) -> Self {
        InferenceError::JsonParse(e.to_string())
    }
}
