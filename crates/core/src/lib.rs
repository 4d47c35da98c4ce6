//! Shapecheck Core - schema inference and structural contract checks for JSON
//!
//! Provides:
//! - Schema inference from sample documents, with string format detection
//! - Validation of documents against JSON Schema (Draft-07)
//! - Mismatch diagnostics pairing each failure with the offending value
//! - On-disk schema storage and a record-or-verify contract workflow

#[cfg(feature = "schema-validation")]
pub mod contract;
pub mod diagnostics;
pub mod inference;
pub mod storage;
#[cfg(feature = "schema-validation")]
pub mod validation;

pub use diagnostics::{Diagnostic, Mismatch, diagnose, render_report};
pub use inference::{
    Format, InferenceConfig, InferenceError, SchemaInferrer, SchemaNode, TypeTag, detect_format,
    infer_schema,
};
pub use storage::{SchemaStore, StorageError};

#[cfg(feature = "schema-validation")]
pub use contract::{CheckOutcome, ConfigError, ContractChecker, ContractConfig, ContractError};
#[cfg(feature = "schema-validation")]
pub use validation::{SchemaError, SchemaValidator, ValidationReport, validate_document};
