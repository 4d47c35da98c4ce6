//! Human-readable mismatch diagnostics
//!
//! The validation engine reports *where* a document failed and *what* the
//! schema expected. This module recovers the offending value from the
//! original document so a report can say "expected X, got Y". It never
//! affects the pass/fail outcome and never fails itself: a path that does
//! not resolve is reported as `undefined`.

mod pointer;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use pointer::{join, resolve, segments};

/// Rendering of a value that does not exist in the document
pub const UNDEFINED: &str = "undefined";

/// One structural mismatch reported by the validation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mismatch {
    /// Location in the validated document
    pub instance_path: String,
    /// Location of the failing keyword in the schema
    pub schema_path: String,
    /// Failing keyword (`type`, `required`, `format`, ...)
    pub keyword: String,
    /// Engine message
    pub message: String,
    /// Expected-type metadata, when the keyword carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
}

impl Mismatch {
    /// Mismatch with no schema metadata beyond the instance path
    pub fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            schema_path: String::new(),
            keyword: String::new(),
            message: message.into(),
            expected: None,
        }
    }

    /// Attach expected-type metadata
    pub fn with_expected(mut self, keyword: impl Into<String>, expected: Value) -> Self {
        self.keyword = keyword.into();
        self.expected = Some(expected);
        self
    }
}

/// A mismatch paired with the actual value found in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub path: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// `None` when the path does not exist in the document
    pub actual: Option<Value>,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic for one mismatch against the original document
    pub fn from_mismatch(document: &Value, mismatch: &Mismatch) -> Self {
        Self {
            path: mismatch.instance_path.clone(),
            keyword: mismatch.keyword.clone(),
            expected: mismatch.expected.as_ref().map(render_expected),
            actual: resolve(document, &mismatch.instance_path).cloned(),
            message: mismatch.message.clone(),
        }
    }

    /// Path for display, `root` for the document itself
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() || self.path == "/" {
            "root"
        } else {
            &self.path
        }
    }

    /// Actual value for display, `undefined` when absent
    pub fn display_actual(&self) -> String {
        match self.actual {
            Some(ref value) => value.to_string(),
            None => UNDEFINED.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Some(ref expected) => write!(
                f,
                "{}: expected {}, got {}",
                self.display_path(),
                expected,
                self.display_actual()
            ),
            None => write!(f, "{}: {}", self.display_path(), self.message),
        }
    }
}

/// Map every mismatch to a diagnostic carrying the actual value
pub fn diagnose(document: &Value, mismatches: &[Mismatch]) -> Vec<Diagnostic> {
    mismatches
        .iter()
        .map(|mismatch| Diagnostic::from_mismatch(document, mismatch))
        .collect()
}

/// Render diagnostics as report lines
pub fn render_report(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// `"number"` -> `number`, `["string", "null"]` -> `string | null`
fn render_expected(expected: &Value) -> String {
    match expected {
        Value::String(s) => s.clone(),
        Value::Array(options) => options
            .iter()
            .map(|option| match option {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | "),
        other => other.to_string(),
    }
}
