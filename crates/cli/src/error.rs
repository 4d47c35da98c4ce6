//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid JSON in {0}: {1}")]
    JsonError(String, String),

    #[error("Inference failed: {0}")]
    InferenceError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Contract check failed: {0}")]
    ContractError(String),

    /// The document did not match; diagnostics were already printed
    #[error("{0} mismatch(es) found")]
    ValidationFailed(usize),
}
