//! Check command implementation

use std::path::PathBuf;

use shapecheck_core::contract::{CheckOutcome, ContractChecker, ContractConfig};

use super::load_document;
use crate::error::CliError;
use crate::output::format_diagnostics;

/// Arguments for the `check` command
pub struct CheckArgs {
    /// Name the schema is stored under
    pub name: String,
    /// Document to check (`-` for stdin)
    pub input: String,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Schema directory, overrides the config file
    pub schema_dir: Option<PathBuf>,
    /// Re-record the schema instead of verifying
    pub update: bool,
    /// Output format (text, json)
    pub format: String,
}

/// Build the contract configuration, flags taking precedence over the file
fn resolve_config(args: &CheckArgs) -> Result<ContractConfig, CliError> {
    let mut config = match args.config {
        Some(ref path) => {
            ContractConfig::load(path).map_err(|e| CliError::ContractError(e.to_string()))?
        }
        None => ContractConfig::default(),
    };

    if let Some(ref dir) = args.schema_dir {
        config = config.with_schema_dir(dir);
    }
    if args.update {
        config = config.with_update(true);
    }
    Ok(config)
}

/// Handle the `check` command
pub fn handle_check(args: &CheckArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let document = load_document(&args.input)?;

    let checker = ContractChecker::new(config);
    let outcome = checker
        .check(&args.name, &document)
        .map_err(|e| CliError::ContractError(e.to_string()))?;

    match outcome {
        CheckOutcome::Recorded { path } => {
            eprintln!("Schema recorded: {}", path.display());
            Ok(())
        }
        CheckOutcome::Updated { path } => {
            eprintln!("Schema updated: {}", path.display());
            Ok(())
        }
        CheckOutcome::Passed => {
            eprintln!("'{}' matches its stored schema", args.name);
            Ok(())
        }
        CheckOutcome::Failed { diagnostics } => {
            println!("{}", format_diagnostics(&diagnostics, &args.format)?);
            Err(CliError::ValidationFailed(diagnostics.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(temp: &TempDir, document: &str) -> CheckArgs {
        let input = temp.path().join("response.json");
        std::fs::write(&input, document).unwrap();

        CheckArgs {
            name: "response".to_string(),
            input: input.display().to_string(),
            config: None,
            schema_dir: Some(temp.path().join("schemas")),
            update: false,
            format: "text".to_string(),
        }
    }

    #[test]
    fn test_record_then_verify() {
        let temp = TempDir::new().unwrap();

        handle_check(&args(&temp, r#"{"id": 1}"#)).unwrap();
        assert!(temp.path().join("schemas/response.schema.json").exists());

        assert!(handle_check(&args(&temp, r#"{"id": 2}"#)).is_ok());
        assert!(matches!(
            handle_check(&args(&temp, r#"{"id": "3"}"#)),
            Err(CliError::ValidationFailed(1))
        ));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("shapecheck.toml");
        std::fs::write(&config_path, "schema_dir = \"elsewhere\"\nupdate = false\n").unwrap();

        let mut args = args(&temp, "{}");
        args.config = Some(config_path);
        args.update = true;

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.schema_dir, temp.path().join("schemas"));
        assert!(config.update);
    }
}
