//! CLI command for schema inference

use std::path::PathBuf;

use serde_json::Value;
use shapecheck_core::inference::{InferenceConfig, SchemaInferrer};

use super::load_document;
use crate::error::CliError;
use crate::output::write_output;

/// Arguments for the `infer` command
pub struct InferArgs {
    /// Sample documents (`-` for stdin)
    pub inputs: Vec<String>,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Output format (json-schema, yaml)
    pub format: String,
    /// Enable format detection
    pub detect_formats: bool,
    /// Maximum depth for nested objects
    pub max_depth: usize,
}

/// Handle the `infer` command
pub fn handle_infer(args: &InferArgs) -> Result<(), CliError> {
    if args.inputs.is_empty() {
        return Err(CliError::InvalidArgument(
            "At least one input is required".to_string(),
        ));
    }

    let samples: Vec<Value> = args
        .inputs
        .iter()
        .map(|input| load_document(input))
        .collect::<Result<_, _>>()?;

    let config = InferenceConfig::builder()
        .detect_formats(args.detect_formats)
        .max_depth(args.max_depth)
        .build();

    eprintln!("Inferring schema from {} sample(s)...", samples.len());
    eprintln!("  Format detection: {}", args.detect_formats);

    let inferrer = SchemaInferrer::with_config(config);
    let document = inferrer
        .infer_samples(&samples)
        .to_document(&inferrer.config().dialect);

    let output_str = render_schema(&document, &args.format)?;
    write_output(args.output.as_deref(), &output_str)
}

fn render_schema(document: &Value, format: &str) -> Result<String, CliError> {
    match format {
        "json-schema" | "json" => serde_json::to_string_pretty(document)
            .map_err(|e| CliError::InferenceError(e.to_string())),
        "yaml" => {
            serde_yaml::to_string(document).map_err(|e| CliError::InferenceError(e.to_string()))
        }
        _ => Err(CliError::InvalidArgument(format!(
            "Unknown output format: {}",
            format
        ))),
    }
}
