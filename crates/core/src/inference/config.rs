//! Configuration for schema inference

use serde::{Deserialize, Serialize};

/// Draft-07 dialect identifier written into generated schema documents
pub const DEFAULT_DIALECT: &str = "http://json-schema.org/draft-07/schema#";

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Enable format detection (date, uuid, email, etc.)
    pub detect_formats: bool,

    /// Maximum object nesting depth. Array items share the depth of their
    /// array. Deeper structures are described by their type only.
    pub max_depth: usize,

    /// Schema dialect identifier for generated documents
    pub dialect: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            detect_formats: true,
            max_depth: 10,
            dialect: DEFAULT_DIALECT.to_string(),
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Enable or disable format detection
    pub fn detect_formats(mut self, detect: bool) -> Self {
        self.config.detect_formats = detect;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth.max(1);
        self
    }

    /// Set the schema dialect identifier
    pub fn dialect(mut self, dialect: impl Into<String>) -> Self {
        self.config.dialect = dialect.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();
        assert!(config.detect_formats);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.dialect, DEFAULT_DIALECT);
    }

    #[test]
    fn test_builder() {
        let config = InferenceConfig::builder()
            .detect_formats(false)
            .max_depth(5)
            .dialect("https://json-schema.org/draft/2020-12/schema")
            .build();

        assert!(!config.detect_formats);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.dialect, "https://json-schema.org/draft/2020-12/schema");
    }

    #[test]
    fn test_depth_clamping() {
        let config = InferenceConfig::builder().max_depth(0).build();
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: InferenceConfig = serde_json::from_str(r#"{"maxDepth": 3}"#).unwrap();
        assert_eq!(config.max_depth, 3);
        assert!(config.detect_formats);
    }
}
