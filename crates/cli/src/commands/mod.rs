//! CLI command implementations

pub mod check;
pub mod infer;
pub mod validate;

use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::CliError;

/// Load input content from file or stdin
fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load and parse a JSON document from file or stdin
pub(crate) fn load_document(input: &str) -> Result<Value, CliError> {
    let content = load_input(input)?;
    serde_json::from_str(&content).map_err(|e| CliError::JsonError(input.to_string(), e.to_string()))
}
