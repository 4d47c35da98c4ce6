//! Contract workflow configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inference::InferenceConfig;

/// Default directory for stored schemas
pub const DEFAULT_SCHEMA_DIR: &str = "__schemas__";

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Configuration for recording and verifying schemas
///
/// ```toml
/// schema_dir = "tests/__schemas__"
/// update = false
/// validate_formats = true
///
/// [inference]
/// detectFormats = true
/// maxDepth = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Directory holding stored schema documents
    pub schema_dir: PathBuf,
    /// Re-record schemas instead of verifying against them
    pub update: bool,
    /// Assert `format` keywords during validation
    pub validate_formats: bool,
    /// Inference settings used when recording
    pub inference: InferenceConfig,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            update: false,
            validate_formats: true,
            inference: InferenceConfig::default(),
        }
    }
}

impl ContractConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the schema directory
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = dir.into();
        self
    }

    /// Enable or disable update mode
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Enable or disable `format` assertions
    pub fn with_format_checks(mut self, validate: bool) -> Self {
        self.validate_formats = validate;
        self
    }

    /// Set the inference configuration
    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = inference;
        self
    }
}
