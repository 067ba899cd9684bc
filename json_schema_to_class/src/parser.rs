//! Schema parser: raw schema tree -> intermediate representation.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{EnumError, JsonSchemaToClassError};
use crate::ir::{ArrayItem, Item, ObjectItem, ParsedSchema, ReferenceItem, ScalarItem, ScalarKind};
use crate::json_pointer::JsonPointer;
use crate::naming::to_class_name;
use crate::schema::{NodeKind, SchemaNode};

/// Depth-first parser over one schema document.
///
/// Definitions are parsed in document order before the root, and a `$ref`
/// only resolves against definitions parsed before it. A definition that
/// refers to one declared later in the document fails with
/// `UnresolvedReference`.
#[derive(Debug, Default)]
pub struct Parser {
    definitions: IndexMap<String, Item>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole schema document into its definitions table and root item.
    ///
    /// # Errors
    ///
    /// Returns the first `JsonSchemaToClassError` hit anywhere in the document;
    /// nothing is returned for a partially parsed schema.
    pub fn parse(mut self, schema: &Value) -> Result<ParsedSchema, JsonSchemaToClassError> {
        let root_path: JsonPointer = JsonPointer::root();
        let node: SchemaNode<'_> = SchemaNode::new(schema, &root_path)?;
        let title: &str = node.title().ok_or(JsonSchemaToClassError::MissingTitle)?;

        if let Some(definitions) = node.definitions() {
            for (name, definition) in definitions {
                let path: JsonPointer = root_path.child2("definitions", name);
                let item: Item = self.parse_definition(name, definition, &path)?;
                self.definitions
                    .insert(format!("#/definitions/{name}"), item);
            }
        }

        let root: Item = self.parse_definition(title, schema, &root_path)?;
        Ok(ParsedSchema {
            definitions: self.definitions,
            root,
        })
    }

    fn parse_definition(
        &self,
        name: &str,
        value: &Value,
        path: &JsonPointer,
    ) -> Result<Item, JsonSchemaToClassError> {
        let node: SchemaNode<'_> = SchemaNode::new(value, path)?;
        match node.kind(path)? {
            NodeKind::Typed(type_value) => {
                let Some(type_name) = type_value.as_str() else {
                    return Err(JsonSchemaToClassError::UnsupportedType {
                        path: path.to_string(),
                        type_name: type_value.to_string(),
                    });
                };
                match type_name {
                    "object" if node.properties().is_some() => self.parse_object(name, node, path),
                    "array" => self.parse_array(name, node, path),
                    _ => {
                        let kind: ScalarKind = ScalarKind::from_schema_type(type_name)
                            .ok_or_else(|| JsonSchemaToClassError::UnsupportedType {
                                path: path.to_string(),
                                type_name: type_name.to_string(),
                            })?;
                        parse_scalar(name, kind, node, path)
                    }
                }
            }
            NodeKind::Enum(values) => {
                let kind: ScalarKind = enum_kind(values, path)?;
                parse_scalar(name, kind, node, path)
            }
            NodeKind::Reference(reference) => self.parse_reference(name, reference, path),
        }
    }

    fn parse_object(
        &self,
        name: &str,
        node: SchemaNode<'_>,
        path: &JsonPointer,
    ) -> Result<Item, JsonSchemaToClassError> {
        let default: Map<String, Value> = match node.default() {
            None => Map::new(),
            Some(Value::Object(default)) => default.clone(),
            Some(_) => {
                return Err(JsonSchemaToClassError::InvalidDefault {
                    path: path.child("default").to_string(),
                    expected: "an object",
                });
            }
        };

        let mut properties: Vec<Item> = Vec::new();
        if let Some(schemas) = node.properties() {
            properties.reserve(schemas.len());
            for (key, schema) in schemas {
                let property_path: JsonPointer = path.child2("properties", key);
                properties.push(self.parse_definition(key, schema, &property_path)?);
            }
        }

        Ok(Item::Object(ObjectItem {
            name: name.to_string(),
            properties,
            default,
            schema: node.value().clone(),
        }))
    }

    fn parse_array(
        &self,
        name: &str,
        node: SchemaNode<'_>,
        path: &JsonPointer,
    ) -> Result<Item, JsonSchemaToClassError> {
        let items_schema: &Value =
            node.items()
                .ok_or_else(|| JsonSchemaToClassError::MissingArrayItems {
                    path: path.to_string(),
                })?;
        let items: Item = self.parse_definition("items", items_schema, &path.child("items"))?;

        let default: Option<Vec<Value>> = match node.default() {
            None => None,
            Some(Value::Array(default)) => Some(default.clone()),
            Some(_) => {
                return Err(JsonSchemaToClassError::InvalidDefault {
                    path: path.child("default").to_string(),
                    expected: "an array",
                });
            }
        };

        Ok(Item::Array(ArrayItem {
            name: name.to_string(),
            items: Box::new(items),
            default,
            schema: node.value().clone(),
        }))
    }

    fn parse_reference(
        &self,
        name: &str,
        reference: &Value,
        path: &JsonPointer,
    ) -> Result<Item, JsonSchemaToClassError> {
        let target: Option<(&str, &Item)> = reference.as_str().and_then(|reference| {
            self.definitions
                .get(reference)
                .map(|target| (reference, target))
        });
        let Some((reference, target)) = target else {
            return Err(JsonSchemaToClassError::UnresolvedReference {
                path: path.to_string(),
                reference: reference
                    .as_str()
                    .map_or_else(|| reference.to_string(), str::to_string),
            });
        };

        Ok(Item::Reference(ReferenceItem {
            name: name.to_string(),
            path: reference.to_string(),
            target_class_name: to_class_name(target.name()),
        }))
    }
}

/// Parse a schema document with a fresh parser.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(schema: &Value) -> Result<ParsedSchema, JsonSchemaToClassError> {
    Parser::new().parse(schema)
}

fn parse_scalar(
    name: &str,
    kind: ScalarKind,
    node: SchemaNode<'_>,
    path: &JsonPointer,
) -> Result<Item, JsonSchemaToClassError> {
    let default: Option<&Value> = node.default();
    if let Some(default) = default
        && !kind.accepts(default)
    {
        return Err(JsonSchemaToClassError::InvalidDefault {
            path: path.child("default").to_string(),
            expected: kind.expected_literal(),
        });
    }
    Ok(Item::Scalar(ScalarItem {
        name: name.to_string(),
        kind,
        default: default.cloned(),
    }))
}

/// JSON type name of a value, distinguishing integers from other numbers.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Infer the scalar kind of an `enum` list: non-empty, one JSON type,
/// and that type is integer, number or string.
fn enum_kind(values: &Value, path: &JsonPointer) -> Result<ScalarKind, JsonSchemaToClassError> {
    let invalid = |reason: EnumError| JsonSchemaToClassError::InvalidEnum {
        path: path.child("enum").to_string(),
        reason,
    };

    let Some((first, rest)) = values.as_array().and_then(|values| values.split_first()) else {
        return Err(invalid(EnumError::Empty));
    };
    let type_name: &'static str = json_type_name(first);
    if rest.iter().any(|value| json_type_name(value) != type_name) {
        return Err(invalid(EnumError::MixedTypes));
    }
    match type_name {
        "integer" => Ok(ScalarKind::Integer),
        "number" => Ok(ScalarKind::Float),
        "string" => Ok(ScalarKind::String),
        other => Err(invalid(EnumError::UnsupportedType(other))),
    }
}
