//! Schema inference engine for JSON samples
//!
//! This module infers a JSON Schema from one or more decoded sample
//! documents, detecting types, string formats and optional fields.
//!
//! ## Features
//!
//! - **Format detection** - Recognize timestamps, UUIDs, e-mail addresses, URIs, IPs and hostnames
//! - **Field merging** - Per-field type unions, nullability and format agreement across siblings
//! - **Required fields** - Fields present and non-null in every sample
//! - **Recursive assembly** - The same merge applies to nested arrays of objects at any depth
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use shapecheck_core::inference::SchemaInferrer;
//!
//! let inferrer = SchemaInferrer::new();
//! let schema = inferrer.infer_document(&json!([
//!     {"id": 1, "email": "alice@example.com"},
//!     {"id": 2}
//! ]));
//!
//! assert_eq!(schema["items"]["required"], json!(["id"]));
//! assert_eq!(schema["items"]["properties"]["email"]["format"], "email");
//! ```

mod config;
mod error;
mod formats;
mod inferrer;
mod merge;
mod types;

pub use config::{DEFAULT_DIALECT, InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
pub use formats::{FORMAT_RULES, Format, detect_format};
pub use inferrer::{SchemaInferrer, infer_schema};
pub use merge::{merge_fields, object_samples, required_fields};
pub use types::{FieldDescriptor, SchemaNode, TypeDescriptor, TypeTag, describe};
