//! Record-or-verify workflow for sample documents
//!
//! The first time a named document is checked its schema is inferred and
//! stored. Later checks validate the document against the stored schema and
//! report every mismatch with the offending value.

mod config;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::diagnostics::{Diagnostic, diagnose};
use crate::inference::SchemaInferrer;
use crate::storage::{SchemaStore, StorageError};
use crate::validation::{SchemaError, SchemaValidator};

pub use config::{ConfigError, ContractConfig, DEFAULT_SCHEMA_DIR};

/// Errors from the contract workflow
#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Stored schema '{name}' is unusable: {source}")]
    Schema {
        name: String,
        #[source]
        source: SchemaError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of checking one document
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// No schema existed; one was inferred and stored
    Recorded { path: PathBuf },
    /// Update mode; the stored schema was replaced
    Updated { path: PathBuf },
    /// The document conforms to the stored schema
    Passed,
    /// The document does not conform
    Failed { diagnostics: Vec<Diagnostic> },
}

impl CheckOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckOutcome::Failed { .. })
    }
}

/// Records schemas on first sight and verifies documents against them
#[derive(Debug, Clone)]
pub struct ContractChecker {
    config: ContractConfig,
    store: SchemaStore,
    inferrer: SchemaInferrer,
}

impl ContractChecker {
    pub fn new(config: ContractConfig) -> Self {
        let store = SchemaStore::new(&config.schema_dir);
        let inferrer = SchemaInferrer::with_config(config.inference.clone());
        Self {
            config,
            store,
            inferrer,
        }
    }

    /// Create a checker from a TOML configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        Ok(Self::new(ContractConfig::load(path)?))
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Check a document against the schema stored under `name`
    pub fn check(&self, name: &str, document: &Value) -> Result<CheckOutcome, ContractError> {
        if self.config.update {
            let path = self.record(name, document)?;
            return Ok(CheckOutcome::Updated { path });
        }

        let Some(schema) = self.store.load(name)? else {
            let path = self.record(name, document)?;
            return Ok(CheckOutcome::Recorded { path });
        };

        let validator = SchemaValidator::with_format_checks(&schema, self.config.validate_formats)
            .map_err(|source| ContractError::Schema {
                name: name.to_string(),
                source,
            })?;

        let report = validator.validate(document);
        if report.valid {
            info!(schema = name, "Document matches stored schema");
            return Ok(CheckOutcome::Passed);
        }

        warn!(
            schema = name,
            mismatches = report.mismatches.len(),
            "Document does not match stored schema"
        );
        Ok(CheckOutcome::Failed {
            diagnostics: diagnose(document, &report.mismatches),
        })
    }

    /// Infer and store a schema for `document`
    ///
    /// The stored schema always accepts the document it was recorded from.
    pub fn record(&self, name: &str, document: &Value) -> Result<PathBuf, ContractError> {
        let mut schema = self.inferrer.infer_document(document);
        if self.config.validate_formats {
            self.drop_rejected_formats(name, document, &mut schema)?;
        }
        Ok(self.store.save(name, &schema)?)
    }

    // Detection is looser than the engine's RFC 3339 checks (`10:30:00`,
    // `2024-01-15 10:30:00Z`), so remove every `format` the engine refuses
    // for the recorded document.
    fn drop_rejected_formats(
        &self,
        name: &str,
        document: &Value,
        schema: &mut Value,
    ) -> Result<(), ContractError> {
        let validator = SchemaValidator::new(schema).map_err(|source| ContractError::Schema {
            name: name.to_string(),
            source,
        })?;

        let rejected: Vec<String> = validator
            .validate(document)
            .mismatches
            .into_iter()
            .filter(|mismatch| mismatch.keyword == "format")
            .filter_map(|mismatch| {
                mismatch
                    .schema_path
                    .strip_suffix("/format")
                    .map(str::to_string)
            })
            .collect();

        for path in &rejected {
            if let Some(Value::Object(node)) = schema.pointer_mut(path)
                && let Some(format) = node.remove("format")
            {
                debug!(schema = name, path = %path, %format, "Dropped rejected format");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn checker(temp: &TempDir) -> ContractChecker {
        ContractChecker::new(ContractConfig::new().with_schema_dir(temp.path()))
    }

    #[test]
    fn test_first_check_records() {
        let temp = TempDir::new().unwrap();
        let checker = checker(&temp);

        let outcome = checker.check("user", &json!({"id": 1})).unwrap();
        let CheckOutcome::Recorded { path } = outcome else {
            panic!("expected Recorded, got {:?}", outcome);
        };
        assert!(path.exists());
        assert!(checker.store().exists("user").unwrap());
    }

    #[test]
    fn test_second_check_passes() {
        let temp = TempDir::new().unwrap();
        let checker = checker(&temp);

        checker.check("user", &json!({"id": 1, "name": "A"})).unwrap();
        let outcome = checker.check("user", &json!({"id": 2, "name": "B"})).unwrap();
        assert_eq!(outcome, CheckOutcome::Passed);
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_drift_fails_with_diagnostics() {
        let temp = TempDir::new().unwrap();
        let checker = checker(&temp);

        checker.check("user", &json!({"id": 1})).unwrap();
        let outcome = checker.check("user", &json!({"id": "one"})).unwrap();
        assert!(outcome.is_failure());

        let CheckOutcome::Failed { diagnostics } = outcome else {
            unreachable!();
        };
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), r#"/id: expected number, got "one""#);
    }

    #[test]
    fn test_update_mode_overwrites() {
        let temp = TempDir::new().unwrap();
        checker(&temp).check("user", &json!({"id": 1})).unwrap();

        let updating =
            ContractChecker::new(ContractConfig::new().with_schema_dir(temp.path()).with_update(true));
        let outcome = updating.check("user", &json!({"id": "one"})).unwrap();
        assert!(matches!(outcome, CheckOutcome::Updated { .. }));

        let outcome = checker(&temp).check("user", &json!({"id": "two"})).unwrap();
        assert_eq!(outcome, CheckOutcome::Passed);
    }

    #[test]
    fn test_unusable_stored_schema() {
        let temp = TempDir::new().unwrap();
        let checker = checker(&temp);
        checker.store().save("bad", &json!({"type": 12})).unwrap();

        let result = checker.check("bad", &json!({}));
        assert!(matches!(result, Err(ContractError::Schema { .. })));
    }

    #[test]
    fn test_rejected_format_is_not_recorded() {
        let temp = TempDir::new().unwrap();
        let checker = checker(&temp);
        let doc = json!({"at": "2024-01-15T10:30:00", "on": "2024-01-15"});

        checker.check("event", &doc).unwrap();
        let stored = checker.store().load("event").unwrap().unwrap();
        assert!(stored["properties"]["at"].get("format").is_none());
        assert_eq!(stored["properties"]["on"]["format"], "date");

        assert_eq!(checker.check("event", &doc).unwrap(), CheckOutcome::Passed);
    }

    #[test]
    fn test_from_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shapecheck.toml");
        std::fs::write(&path, "update = true\n").unwrap();
        assert!(ContractChecker::from_config_file(&path).unwrap().config().update);

        std::fs::write(&path, "update = 3\n").unwrap();
        assert!(matches!(
            ContractChecker::from_config_file(&path),
            Err(ContractError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_invalid_name() {
        let temp = TempDir::new().unwrap();
        let result = checker(&temp).check("../outside", &json!({}));
        assert!(matches!(result, Err(ContractError::Storage(_))));
    }
}
