//! Convert JSON Schema documents into Python classes.
//!
//! The pipeline is one-directional: a decoded schema is parsed into an
//! intermediate representation ([`ParsedSchema`]) and the emitter renders it
//! as Python source. Generated classes default-populate missing values, and
//! can optionally validate their input and render a `__repr__`.

mod batch;
mod code;
mod codegen;
mod error;
pub mod ir;
mod json_pointer;
mod naming;
mod parser;
mod python;
mod schema;
mod settings;
mod writer;

pub use batch::generate_dir;
pub use codegen::generate;
pub use error::{EnumError, JsonSchemaToClassError};
pub use ir::ParsedSchema;
pub use parser::{Parser, parse};
pub use settings::GenerateSettings;
pub use writer::write_if_changed;

use std::path::Path;

/// Generate Python classes from a JSON Schema string.
///
/// # Errors
///
/// Returns `JsonSchemaToClassError` if the schema JSON is invalid, cannot be
/// parsed into classes, or its root is not an object or array.
pub fn generate_code(
    schema_json: &str,
    settings: &GenerateSettings,
) -> Result<String, JsonSchemaToClassError> {
    let schema: serde_json::Value = serde_json::from_str(schema_json)?;
    let parsed: ParsedSchema = parse(&schema)?;
    generate(&parsed, &schema, settings)
}

/// Generate Python classes from a JSON Schema file.
///
/// # Errors
///
/// Returns `JsonSchemaToClassError` if reading the file fails, or for any
/// reason [`generate_code`] fails.
pub fn generate_from_file(
    schema_path: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<String, JsonSchemaToClassError> {
    let schema_json: String = std::fs::read_to_string(schema_path)?;
    generate_code(&schema_json, settings)
}

/// Generate Python classes from a JSON Schema file into `output_path`,
/// writing only if the content changed. Returns whether the file was written.
///
/// # Errors
///
/// Returns `JsonSchemaToClassError` if generation fails or the output file
/// cannot be written.
pub fn generate_file(
    schema_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<bool, JsonSchemaToClassError> {
    let code: String = generate_from_file(schema_path, settings)?;
    write_if_changed(output_path, &code)
}
