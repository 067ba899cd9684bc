//! Binary to generate Python classes from JSON Schema files.
//!
//! Usage:
//! - `json-schema-to-class generate schema.json [-o out.py] [-i 4] [--repr] [--validate]`
//! - `json-schema-to-class generate-dir schemas/ build/ [-i 4] [--repr] [--validate]`
//!
//! Without `-o`, `generate` writes the generated code to stdout.

use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use json_schema_to_class::{
    GenerateSettings, JsonSchemaToClassError, generate_dir, generate_from_file, write_if_changed,
};
use tracing_subscriber::EnvFilter;

/// Convert JSON Schema into Python classes.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one Python module from one schema file.
    Generate {
        schema_path: PathBuf,

        /// Output .py file (stdout if omitted).
        #[arg(short, long)]
        output_path: Option<PathBuf>,

        #[command(flatten)]
        options: GenerateOptions,
    },
    /// Generate one module per `*.json` schema in a directory, plus `__init__.py`.
    GenerateDir {
        schema_dir: PathBuf,
        output_dir: PathBuf,

        #[command(flatten)]
        options: GenerateOptions,
    },
}

#[derive(Args, Debug)]
struct GenerateOptions {
    /// JSON file with generation settings; flags below override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(short, long)]
    indent: Option<usize>,

    /// Generate a `__repr__` method for every object class.
    #[arg(long = "repr")]
    generate_repr: bool,

    /// Embed the schema and validate input with `jsonschema`.
    #[arg(long = "validate")]
    generate_validate: bool,
}

impl GenerateOptions {
    fn to_settings(&self) -> Result<GenerateSettings, JsonSchemaToClassError> {
        let mut settings: GenerateSettings = match &self.settings {
            Some(path) => GenerateSettings::from_json(&std::fs::read_to_string(path)?)?,
            None => GenerateSettings::default(),
        };
        if let Some(indent) = self.indent {
            settings.indent = indent;
        }
        settings.generate_repr |= self.generate_repr;
        settings.generate_validate |= self.generate_validate;
        Ok(settings)
    }
}

fn generate(
    schema_path: &Path,
    output_path: Option<&Path>,
    settings: &GenerateSettings,
) -> Result<(), JsonSchemaToClassError> {
    let code: String = generate_from_file(schema_path, settings)?;
    match output_path {
        Some(output_path) => {
            write_if_changed(output_path, &code)?;
        }
        None => stdout().write_all(code.as_bytes())?,
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), JsonSchemaToClassError> {
    match &cli.command {
        Command::Generate {
            schema_path,
            output_path,
            options,
        } => generate(schema_path, output_path.as_deref(), &options.to_settings()?),
        Command::GenerateDir {
            schema_dir,
            output_dir,
            options,
        } => {
            generate_dir(schema_dir, output_dir, &options.to_settings()?)?;
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli: Cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
