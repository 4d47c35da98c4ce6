//! JSON Schema validation adapter
//!
//! The accept/reject decision belongs to the `jsonschema` engine. This module
//! only compiles schema documents, runs the engine, and turns every error it
//! reports into a [`Mismatch`] carrying the expected-type metadata that the
//! diagnostics layer needs.

use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::diagnostics::{Mismatch, join, resolve, segments};

/// Errors raised while preparing a schema for validation
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// Schema text is not JSON
    #[error("Failed to parse schema: {0}")]
    Parse(String),

    /// The engine rejected the schema document
    #[error("Failed to compile schema: {0}")]
    Compile(String),
}

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub mismatches: Vec<Mismatch>,
}

/// Compiled schema ready to validate documents
pub struct SchemaValidator {
    schema: Value,
    validator: Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a schema document with format assertions enabled
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        Self::with_format_checks(schema, true)
    }

    /// Compile a schema document, choosing whether `format` is asserted
    pub fn with_format_checks(schema: &Value, validate_formats: bool) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(validate_formats)
            .build(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;

        Ok(Self {
            schema: schema.clone(),
            validator,
        })
    }

    /// Parse and compile a schema from JSON text
    pub fn from_json(content: &str, validate_formats: bool) -> Result<Self, SchemaError> {
        let schema: Value =
            serde_json::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::with_format_checks(&schema, validate_formats)
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate a document, collecting every mismatch the engine reports
    pub fn validate(&self, instance: &Value) -> ValidationReport {
        let mismatches: Vec<Mismatch> = self
            .validator
            .iter_errors(instance)
            .map(|error| {
                let instance_path = error.instance_path().to_string();
                let schema_path = error.schema_path().to_string();
                let message = error.to_string();
                match error.kind() {
                    ValidationErrorKind::Required { property } => {
                        self.missing_property(&instance_path, &schema_path, property, message)
                    }
                    _ => self.mismatch(instance_path, schema_path, message),
                }
            })
            .collect();

        debug!(mismatches = mismatches.len(), "Validation finished");

        ValidationReport {
            valid: mismatches.is_empty(),
            mismatches,
        }
    }

    fn mismatch(&self, instance_path: String, schema_path: String, message: String) -> Mismatch {
        let keyword = segments(&schema_path).pop().unwrap_or_default();
        let expected = match keyword.as_str() {
            "type" | "format" => resolve(&self.schema, &schema_path).cloned(),
            _ => None,
        };

        Mismatch {
            instance_path,
            schema_path,
            keyword,
            message,
            expected,
        }
    }

    // Point a missing required property at the property itself, so the
    // report shows what type was expected there and that nothing was found.
    fn missing_property(
        &self,
        instance_path: &str,
        schema_path: &str,
        property: &Value,
        message: String,
    ) -> Mismatch {
        let Some(name) = property.as_str() else {
            return self.mismatch(instance_path.to_string(), schema_path.to_string(), message);
        };

        let object_schema_path = schema_path
            .strip_suffix("/required")
            .unwrap_or(schema_path);
        let property_type_path = join(&join(&join(object_schema_path, "properties"), name), "type");

        Mismatch {
            instance_path: join(instance_path, name),
            schema_path: schema_path.to_string(),
            keyword: "required".to_string(),
            message,
            expected: resolve(&self.schema, &property_type_path).cloned(),
        }
    }
}

/// Validate a document against a schema document in one call
pub fn validate_document(schema: &Value, instance: &Value) -> Result<ValidationReport, SchemaError> {
    Ok(SchemaValidator::new(schema)?.validate(instance))
}
