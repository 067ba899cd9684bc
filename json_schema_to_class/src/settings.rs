//! Settings for JSON Schema to class generation.

use serde::Deserialize;

use crate::error::JsonSchemaToClassError;

/// Settings that control code generation behavior.
///
/// Passed by reference into every generate call; nothing here is global, so
/// independent generations may run side by side with different settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    /// Spaces per indentation level.
    ///
    /// **Default: 4.**
    pub indent: usize,

    /// Line terminator used for every emitted line, including the final one.
    ///
    /// **Default: `"\n"`.**
    pub line_break: String,

    /// When true, every object class gets a `__repr__` rendering
    /// `ClassName[prop: value, ...]`.
    ///
    /// **Default: false.**
    pub generate_repr: bool,

    /// When true, every object and list class embeds its schema fragment and
    /// validates constructor input with `jsonschema` before populating itself.
    ///
    /// **Default: false.**
    pub generate_validate: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            indent: 4,
            line_break: "\n".to_string(),
            generate_repr: false,
            generate_validate: false,
        }
    }
}

impl GenerateSettings {
    /// Load settings from a JSON document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `JsonSchemaToClassError::Json` if the document is not valid JSON
    /// or contains unknown keys.
    pub fn from_json(settings_json: &str) -> Result<Self, JsonSchemaToClassError> {
        Ok(serde_json::from_str(settings_json)?)
    }
}
