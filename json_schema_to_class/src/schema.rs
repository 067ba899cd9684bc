use serde_json::{Map, Value};

use crate::error::JsonSchemaToClassError;
use crate::json_pointer::JsonPointer;

/// Borrowed view over one JSON Schema node.
///
/// Only the keywords used by the parser are exposed; any other key in the
/// node is ignored. Maps keep document order (`serde_json` `preserve_order`).
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    value: &'a Value,
    object: &'a Map<String, Value>,
}

/// How a node is classified, checked in this priority order.
#[derive(Debug)]
pub enum NodeKind<'a> {
    Typed(&'a Value),
    Enum(&'a Value),
    Reference(&'a Value),
}

impl<'a> SchemaNode<'a> {
    /// Wrap a raw value; anything but a JSON object is unparsable.
    pub fn new(value: &'a Value, path: &JsonPointer) -> Result<Self, JsonSchemaToClassError> {
        match value {
            Value::Object(object) => Ok(Self { value, object }),
            _ => Err(JsonSchemaToClassError::UnparsableSchema {
                path: path.to_string(),
                node: value.clone(),
            }),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn kind(&self, path: &JsonPointer) -> Result<NodeKind<'a>, JsonSchemaToClassError> {
        if let Some(t) = self.object.get("type") {
            Ok(NodeKind::Typed(t))
        } else if let Some(e) = self.object.get("enum") {
            Ok(NodeKind::Enum(e))
        } else if let Some(r) = self.object.get("$ref") {
            Ok(NodeKind::Reference(r))
        } else {
            Err(JsonSchemaToClassError::UnparsableSchema {
                path: path.to_string(),
                node: self.value.clone(),
            })
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.object.get("title").and_then(Value::as_str)
    }

    /// `properties` when present as a JSON object.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.object.get("properties").and_then(Value::as_object)
    }

    /// `definitions` when present as a JSON object.
    pub fn definitions(&self) -> Option<&'a Map<String, Value>> {
        self.object.get("definitions").and_then(Value::as_object)
    }

    pub fn items(&self) -> Option<&'a Value> {
        self.object.get("items")
    }

    /// The `default` keyword. An explicit `null` counts as no default.
    pub fn default(&self) -> Option<&'a Value> {
        self.object.get("default").filter(|v| !v.is_null())
    }
}
