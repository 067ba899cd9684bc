//! Intermediate representation produced by the parser and consumed by the emitter.
//!
//! Items are built once per parse call and never mutated afterwards.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::naming::to_class_name;

/// Primitive kind of a scalar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
    String,
    Boolean,
    /// `type: "array"` fallback when no further structure applies.
    List,
    /// `type: "object"` without `properties`.
    Dict,
}

impl ScalarKind {
    /// Map a JSON Schema `type` keyword to a scalar kind.
    #[must_use]
    pub fn from_schema_type(type_name: &str) -> Option<Self> {
        let kind = match type_name {
            "integer" => Self::Integer,
            "number" => Self::Float,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "array" => Self::List,
            "object" => Self::Dict,
            _ => return None,
        };
        Some(kind)
    }

    /// The Python type annotation for this kind.
    #[must_use]
    pub fn python_name(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::String => "str",
            Self::Boolean => "bool",
            Self::List => "list",
            Self::Dict => "dict",
        }
    }

    /// Whether `value` is a literal of this kind. Integers are accepted for floats.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Dict => value.is_object(),
        }
    }

    /// Human-readable description used in default mismatch errors.
    #[must_use]
    pub fn expected_literal(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Float => "a number",
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::List => "an array",
            Self::Dict => "an object",
        }
    }
}

/// Terminal item holding a primitive value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarItem {
    pub name: String,
    pub kind: ScalarKind,
    pub default: Option<Value>,
}

/// Pointer to a definition parsed earlier in the same document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceItem {
    pub name: String,
    /// The `$ref` path, e.g. `#/definitions/point`.
    pub path: String,
    /// Class name derived from the referenced definition's name.
    pub target_class_name: String,
}

/// Structured record with ordered, named properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectItem {
    pub name: String,
    pub properties: Vec<Item>,
    pub default: Map<String, Value>,
    /// The schema fragment this object was parsed from.
    pub schema: Value,
}

/// Sequence of a single element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub name: String,
    pub items: Box<Item>,
    pub default: Option<Vec<Value>>,
    /// The schema fragment this array was parsed from.
    pub schema: Value,
}

impl ArrayItem {
    /// Element kind of an array of scalars. Such an array needs no wrapper
    /// class and is annotated `List[T]`.
    #[must_use]
    pub fn flat_kind(&self) -> Option<ScalarKind> {
        match self.items.as_ref() {
            Item::Scalar(scalar) => Some(scalar.kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat_kind().is_some()
    }
}

/// A node of the intermediate representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Scalar(ScalarItem),
    Reference(ReferenceItem),
    Object(ObjectItem),
    Array(ArrayItem),
}

impl Item {
    /// The property key or schema title this item was parsed under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(s) => &s.name,
            Self::Reference(r) => &r.name,
            Self::Object(o) => &o.name,
            Self::Array(a) => &a.name,
        }
    }

    /// The class this item is constructed as. For references, the referenced class.
    #[must_use]
    pub fn class_name(&self) -> String {
        match self {
            Self::Reference(r) => r.target_class_name.clone(),
            _ => to_class_name(self.name()),
        }
    }

    /// Short description of the variant, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.kind.python_name(),
            Self::Reference(_) => "reference",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    /// Whether this item needs its own nested class definition.
    #[must_use]
    pub fn is_inner_model(&self) -> bool {
        match self {
            Self::Scalar(_) | Self::Reference(_) => false,
            Self::Object(_) => true,
            Self::Array(a) => !a.is_flat(),
        }
    }

    /// Children that must be emitted as nested classes, in declared order.
    #[must_use]
    pub fn inner_models(&self) -> Vec<&Item> {
        match self {
            Self::Scalar(_) | Self::Reference(_) => Vec::new(),
            Self::Object(o) => o.properties.iter().filter(|p| p.is_inner_model()).collect(),
            Self::Array(a) => {
                if a.items.is_inner_model() {
                    vec![a.items.as_ref()]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// Result of parsing one schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchema {
    /// `#/definitions/<name>` -> item, in document order.
    pub definitions: IndexMap<String, Item>,
    pub root: Item,
}
