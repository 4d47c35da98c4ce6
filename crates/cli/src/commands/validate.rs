//! Validate command implementation

use std::path::PathBuf;

use shapecheck_core::diagnostics::diagnose;
use shapecheck_core::validation::SchemaValidator;
use tracing::debug;

use super::load_document;
use crate::error::CliError;
use crate::output::format_diagnostics;

/// Arguments for the `validate` command
pub struct ValidateArgs {
    /// Schema document to validate against
    pub schema: PathBuf,
    /// Document to validate (`-` for stdin)
    pub input: String,
    /// Output format (text, json)
    pub format: String,
    /// Assert `format` keywords
    pub format_checks: bool,
}

/// Handle the `validate` command
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let schema_text = std::fs::read_to_string(&args.schema)
        .map_err(|e| CliError::FileReadError(args.schema.clone(), e.to_string()))?;
    let validator = SchemaValidator::from_json(&schema_text, args.format_checks)
        .map_err(|e| CliError::SchemaError(e.to_string()))?;
    let document = load_document(&args.input)?;

    let report = validator.validate(&document);
    debug!(valid = report.valid, "Validated {}", args.input);

    let diagnostics = diagnose(&document, &report.mismatches);
    if report.valid {
        if args.format == "json" {
            println!("{}", format_diagnostics(&diagnostics, &args.format)?);
        } else {
            println!("Validation successful");
        }
        return Ok(());
    }

    println!("{}", format_diagnostics(&diagnostics, &args.format)?);
    Err(CliError::ValidationFailed(diagnostics.len()))
}
