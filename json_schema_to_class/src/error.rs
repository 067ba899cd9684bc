use std::fmt;

use thiserror::Error;

/// Why an `enum` keyword could not be turned into a scalar item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumError {
    /// The `enum` list is empty (or not a list at all).
    Empty,

    /// The `enum` list mixes values of different JSON types.
    MixedTypes,

    /// All values share one type, but it is not integer, number or string.
    UnsupportedType(&'static str),
}

impl fmt::Display for EnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "enum list is empty"),
            Self::MixedTypes => write!(f, "items in enum list have different types"),
            Self::UnsupportedType(kind) => {
                write!(f, "enum type {kind} is not integer, number or string")
            }
        }
    }
}

/// Error type for JSON Schema to class conversion.
///
/// Every variant is fatal to the call that produced it: there is no partial
/// parse and no partial output.
#[derive(Debug, Error)]
pub enum JsonSchemaToClassError {
    /// A schema node has none of `type`, `enum` or `$ref`.
    #[error("cannot parse schema at \"{path}\": {node}")]
    UnparsableSchema {
        path: String,
        node: serde_json::Value,
    },

    /// A `$ref` that is not (yet) in the definitions table.
    #[error("unresolved reference \"{reference}\" at \"{path}\"")]
    UnresolvedReference { path: String, reference: String },

    #[error("invalid enum at \"{path}\": {reason}")]
    InvalidEnum { path: String, reason: EnumError },

    /// `type: "array"` without an `items` sub-schema.
    #[error("array schema at \"{path}\" has no \"items\"")]
    MissingArrayItems { path: String },

    /// Class emission was requested for an item that only ever contributes
    /// an initializer line.
    #[error("cannot convert [{name}] ({kind}) to class")]
    NotEmittable { name: String, kind: &'static str },

    #[error("unsupported type {type_name} at \"{path}\"")]
    UnsupportedType { path: String, type_name: String },

    /// The root schema needs a `title` to name the root class.
    #[error("root schema has no string \"title\"")]
    MissingTitle,

    #[error("default at \"{path}\" is not {expected}")]
    InvalidDefault {
        path: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
