//! Output formatting for CLI

use std::path::Path;

use serde::Serialize;
use shapecheck_core::diagnostics::{Diagnostic, render_report};

use crate::error::CliError;

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    valid: bool,
    diagnostics: &'a [Diagnostic],
}

/// Render diagnostics as `text` (one line per mismatch) or `json`
pub fn format_diagnostics(diagnostics: &[Diagnostic], format: &str) -> Result<String, CliError> {
    match format {
        "text" => Ok(render_report(diagnostics)),
        "json" => serde_json::to_string_pretty(&DiagnosticReport {
            valid: diagnostics.is_empty(),
            diagnostics,
        })
        .map_err(|e| CliError::InvalidArgument(e.to_string())),
        _ => Err(CliError::InvalidArgument(format!(
            "Unknown output format: {}",
            format
        ))),
    }
}

/// Write to a file when a path is given, otherwise print to stdout
pub fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            let mut content = content.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shapecheck_core::diagnostics::{Mismatch, diagnose};

    fn diagnostics() -> Vec<Diagnostic> {
        let doc = json!({"id": "x"});
        diagnose(
            &doc,
            &[Mismatch::new("/id", "bad").with_expected("type", json!("number"))],
        )
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            format_diagnostics(&diagnostics(), "text").unwrap(),
            r#"/id: expected number, got "x""#
        );
    }

    #[test]
    fn test_json_format() {
        let rendered = format_diagnostics(&diagnostics(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["diagnostics"][0]["path"], "/id");
        assert_eq!(value["diagnostics"][0]["actual"], "x");
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            format_diagnostics(&[], "xml"),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
