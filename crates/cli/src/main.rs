//! shapecheck - infer JSON schemas from samples and check documents against them

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::check::{CheckArgs, handle_check};
use commands::infer::{InferArgs, handle_infer};
use commands::validate::{ValidateArgs, handle_validate};
use error::CliError;

/// Infer JSON schemas from sample documents and report structural drift
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infer a JSON Schema from one or more sample documents
    ///
    /// All inputs are merged as one sample set: fields missing or null in
    /// any sample become nullable and are left out of `required`.
    Infer {
        /// Sample JSON files (`-` for stdin)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json-schema", value_parser = ["json-schema", "yaml"])]
        format: String,

        /// Disable string format detection
        #[arg(long)]
        no_formats: bool,

        /// Maximum object nesting depth to describe
        #[arg(long, default_value_t = 10)]
        max_depth: usize,
    },

    /// Validate a document against a schema file
    Validate {
        /// Schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON document (`-` for stdin)
        input: String,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Do not assert `format` keywords
        #[arg(long)]
        no_format_checks: bool,
    },

    /// Record a schema on first use, verify against it afterwards
    Check {
        /// Name to store the schema under
        name: String,

        /// JSON document (`-` for stdin)
        input: String,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding stored schemas
        #[arg(long)]
        schema_dir: Option<PathBuf>,

        /// Re-record the stored schema
        #[arg(short, long)]
        update: bool,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so schema output on stdout stays clean for piping
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("shapecheck=debug,shapecheck_core=debug"),
        _ => EnvFilter::new("shapecheck=trace,shapecheck_core=trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Infer {
            inputs,
            output,
            format,
            no_formats,
            max_depth,
        } => handle_infer(&InferArgs {
            inputs,
            output,
            format,
            detect_formats: !no_formats,
            max_depth,
        }),
        Commands::Validate {
            schema,
            input,
            format,
            no_format_checks,
        } => handle_validate(&ValidateArgs {
            schema,
            input,
            format,
            format_checks: !no_format_checks,
        }),
        Commands::Check {
            name,
            input,
            config,
            schema_dir,
            update,
            format,
        } => handle_check(&CheckArgs {
            name,
            input,
            config,
            schema_dir,
            update,
            format,
        }),
    };

    match result {
        Ok(()) => Ok(()),
        // Diagnostics are already on stdout
        Err(CliError::ValidationFailed(count)) => {
            eprintln!("{} mismatch(es) found", count);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
