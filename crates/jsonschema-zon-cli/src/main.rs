#![allow(clippy::print_stdout, clippy::print_stderr)]
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use jsonschema_zon::zon::Validator;
use serde_json::Value;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Validate JSON documents against a JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "jsonschema-zon", version, about)]
struct Cli {
    /// A path to a JSON Schema document.
    #[arg(value_parser, required = true)]
    schema: PathBuf,

    /// A path to a JSON instance (i.e. filename.json) to validate (may be specified multiple
    /// times).
    #[arg(short = 'i', long = "instance")]
    instances: Vec<PathBuf>,

    /// Log compilation steps to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn validate_instance(validator: &Validator, path: &Path) -> bool {
    let instance = match read_json(path) {
        Ok(instance) => instance,
        Err(error) => {
            warn!(path = %path.display(), %error, "Failed to load instance");
            println!("{} - ERROR: {error}", path.display());
            return false;
        }
    };
    let result = validator.validate(&instance);
    debug!(
        path = %path.display(),
        errors = result.as_ref().err().map_or(0, Vec::len),
        "Validated instance"
    );
    match result {
        Ok(()) => {
            println!("{} - VALID", path.display());
            true
        }
        Err(errors) => {
            println!("{} - INVALID. Errors:", path.display());
            for (idx, error) in errors.iter().enumerate() {
                println!("{}. {}: {error}", idx + 1, error.path());
            }
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let validator = match jsonschema_zon::reader::from_path(&cli.schema)
        .map_err(|error| error.to_string())
        .and_then(|document| document.generate().map_err(|error| error.to_string()))
    {
        Ok(validator) => {
            debug!(schema = %cli.schema.display(), "Compiled schema");
            validator
        }
        Err(error) => {
            eprintln!("Schema {} is invalid: {error}", cli.schema.display());
            return ExitCode::FAILURE;
        }
    };

    if cli.instances.is_empty() {
        println!("Schema is valid");
        return ExitCode::SUCCESS;
    }

    let mut success = true;
    for instance in &cli.instances {
        success &= validate_instance(&validator, instance);
    }
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
