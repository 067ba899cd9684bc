use serde_json::{Map, Value};

use crate::code::CodeBlock;
use crate::error::JsonSchemaToClassError;
use crate::ir::{ArrayItem, Item, ObjectItem, ParsedSchema};
use crate::naming::to_attribute_name;
use crate::python;
use crate::settings::GenerateSettings;

/// Per-call emission state.
///
/// `uses_list` records whether any flat `List[T]` annotation was emitted, which
/// decides the `typing` import. It lives only as long as one `generate` call.
struct Emitter<'a> {
    settings: &'a GenerateSettings,
    definitions: Option<&'a Map<String, Value>>,
    uses_list: bool,
}

impl<'a> Emitter<'a> {
    fn new(schema: &'a Value, settings: &'a GenerateSettings) -> Self {
        Self {
            settings,
            definitions: schema.get("definitions").and_then(Value::as_object),
            uses_list: false,
        }
    }

    /// Emit the class definition of an object or list item at level 0.
    fn emit_class(&mut self, item: &Item) -> Result<CodeBlock, JsonSchemaToClassError> {
        match item {
            Item::Object(object) => self.emit_object(item, object),
            Item::Array(array) => self.emit_array(item, array),
            Item::Scalar(_) | Item::Reference(_) => Err(JsonSchemaToClassError::NotEmittable {
                name: item.name().to_string(),
                kind: item.kind_name(),
            }),
        }
    }

    fn emit_object(
        &mut self,
        item: &Item,
        object: &ObjectItem,
    ) -> Result<CodeBlock, JsonSchemaToClassError> {
        let class_name: String = item.class_name();
        let mut block: CodeBlock = CodeBlock::new();
        block.line(0, format!("class {class_name}:"));
        self.emit_schema_constant(&mut block, &object.schema)?;
        self.emit_inner_models(&mut block, item)?;

        block.line(1, "def __init__(self, values: dict = None):");
        block.line(
            2,
            format!(
                "values = values if values is not None else {}",
                python::dict_literal(&object.default)
            ),
        );
        self.emit_validate_call(&mut block);
        for property in &object.properties {
            let line: String = self.init_line(property);
            block.line(2, line);
        }

        if self.settings.generate_repr {
            block.blank();
            block.line(1, "def __repr__(self) -> str:");
            block.line(2, repr_return(&class_name, &object.properties));
        }
        Ok(block)
    }

    fn emit_array(
        &mut self,
        item: &Item,
        array: &ArrayItem,
    ) -> Result<CodeBlock, JsonSchemaToClassError> {
        let mut block: CodeBlock = CodeBlock::new();
        block.line(0, format!("class {}(list):", item.class_name()));
        self.emit_schema_constant(&mut block, &array.schema)?;
        self.emit_inner_models(&mut block, item)?;

        block.line(1, "def __init__(self, values: list = None):");
        block.line(2, "super().__init__()");
        block.line(
            2,
            format!(
                "values = values if values is not None else {}",
                python::list_literal(array.default.as_deref().unwrap_or_default())
            ),
        );
        self.emit_validate_call(&mut block);
        block.line(2, list_line(&array.items));
        Ok(block)
    }

    /// Nested classes go before the constructor that instantiates them.
    fn emit_inner_models(
        &mut self,
        block: &mut CodeBlock,
        item: &Item,
    ) -> Result<(), JsonSchemaToClassError> {
        for inner in item.inner_models() {
            let inner_block: CodeBlock = self.emit_class(inner)?;
            block.append(inner_block, 1);
            block.blank();
        }
        Ok(())
    }

    fn emit_schema_constant(
        &self,
        block: &mut CodeBlock,
        fragment: &Value,
    ) -> Result<(), JsonSchemaToClassError> {
        if !self.settings.generate_validate {
            return Ok(());
        }
        let encoded: String = serde_json::to_string(&self.standalone_fragment(fragment))?;
        block.line(
            1,
            format!("_schema = json.loads({})", python::string_literal(&encoded)),
        );
        block.blank();
        Ok(())
    }

    fn emit_validate_call(&self, block: &mut CodeBlock) {
        if self.settings.generate_validate {
            block.line(2, "jsonschema.validate(values, self._schema)");
        }
    }

    /// The fragment with the document's `definitions` attached, so `$ref`
    /// paths inside it resolve on their own.
    fn standalone_fragment(&self, fragment: &Value) -> Value {
        match (fragment, self.definitions) {
            (Value::Object(object), Some(definitions)) if !object.contains_key("definitions") => {
                let mut object: Map<String, Value> = object.clone();
                object.insert(
                    "definitions".to_string(),
                    Value::Object(definitions.clone()),
                );
                Value::Object(object)
            }
            _ => fragment.clone(),
        }
    }

    /// The constructor line initializing one property.
    fn init_line(&mut self, property: &Item) -> String {
        let attribute: String = to_attribute_name(property.name());
        let key: String = python::double_quoted(property.name());
        match property {
            Item::Scalar(scalar) => format!(
                "self.{attribute}: {} = values.get({key}, {})",
                scalar.kind.python_name(),
                python::optional_literal(scalar.default.as_ref())
            ),
            Item::Reference(reference) => format!(
                "self.{attribute} = {}(values=values.get({key}))",
                reference.target_class_name
            ),
            Item::Array(array) => match array.flat_kind() {
                Some(element) => {
                    self.uses_list = true;
                    let default: String = array
                        .default
                        .as_deref()
                        .map_or_else(|| "None".to_string(), python::list_literal);
                    format!(
                        "self.{attribute}: List[{}] = values.get({key}, {default})",
                        element.python_name()
                    )
                }
                None => nested_init_line(&attribute, &property.class_name(), &key),
            },
            Item::Object(_) => nested_init_line(&attribute, &property.class_name(), &key),
        }
    }
}

/// Nested classes are reached through `self`.
fn nested_init_line(attribute: &str, class_name: &str, key: &str) -> String {
    format!("self.{attribute} = self.{class_name}(values=values.get({key}))")
}

/// The line populating a list wrapper from its input values.
fn list_line(element: &Item) -> String {
    match element {
        Item::Reference(reference) => format!(
            "self[:] = [{}(value) for value in values]",
            reference.target_class_name
        ),
        Item::Object(_) | Item::Array(_) if element.is_inner_model() => format!(
            "self[:] = [self.{}(value) for value in values]",
            element.class_name()
        ),
        Item::Scalar(_) | Item::Object(_) | Item::Array(_) => "self[:] = values".to_string(),
    }
}

/// `return f'ClassName[a: {self.a}, b: {self.b}]'`
fn repr_return(class_name: &str, properties: &[Item]) -> String {
    if properties.is_empty() {
        return format!("return '{class_name}[]'");
    }
    let fields: Vec<String> = properties
        .iter()
        .map(|property| {
            let attribute: String = to_attribute_name(property.name());
            format!("{attribute}: {{self.{attribute}}}")
        })
        .collect();
    format!("return f'{class_name}[{}]'", fields.join(", "))
}

/// Generate Python class definitions for a parsed schema.
///
/// Definitions are emitted in table order, each followed by two blank lines,
/// then the root class. Import lines are prepended as needed. The result ends
/// with `settings.line_break`.
///
/// # Errors
///
/// Returns `JsonSchemaToClassError::NotEmittable` if the root or a definition
/// is a scalar or a reference.
pub fn generate(
    parsed: &ParsedSchema,
    schema: &Value,
    settings: &GenerateSettings,
) -> Result<String, JsonSchemaToClassError> {
    let mut emitter: Emitter<'_> = Emitter::new(schema, settings);

    let mut body: CodeBlock = CodeBlock::new();
    for definition in parsed.definitions.values() {
        body.append(emitter.emit_class(definition)?, 0);
        body.blank();
        body.blank();
    }
    body.append(emitter.emit_class(&parsed.root)?, 0);

    let mut file: CodeBlock = CodeBlock::new();
    if emitter.uses_list {
        file.line(0, "from typing import List");
    }
    if settings.generate_validate {
        file.line(0, "import json");
        file.line(0, "import jsonschema");
    }
    if !file.is_empty() {
        file.blank();
        file.blank();
    }
    file.append(body, 0);

    let mut text: String = file.render(settings.indent, &settings.line_break);
    text.push_str(&settings.line_break);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use serde_json::json;

    fn generate_with(schema: &Value, settings: &GenerateSettings) -> String {
        let parsed: ParsedSchema = parse(schema).expect("schema should parse");
        generate(&parsed, schema, settings).expect("generate should succeed")
    }

    fn generate_default(schema: &Value) -> String {
        generate_with(schema, &GenerateSettings::default())
    }

    #[test]
    fn generate_object_with_scalar_default() {
        let schema: Value = json!({
            "title": "config",
            "type": "object",
            "properties": { "x": { "type": "integer", "default": 5 } }
        });

        let expected: &str = r#"class Config:
    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.x: int = values.get("x", 5)
"#;

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_nested_object_before_constructor() {
        let schema: Value = serde_json::from_str(
            r#"{
                "title": "lr_scheduler_config",
                "type": "object",
                "properties": {
                    "lr_decay": { "type": "number", "default": 0.1 },
                    "warm_up": {
                        "type": "object",
                        "properties": {
                            "start": { "type": "number", "default": 0.0 },
                            "steps": { "type": "integer", "default": 0 }
                        }
                    },
                    "mode": { "enum": ["cos", "linear"], "default": "cos" }
                }
            }"#,
        )
        .expect("valid json");

        let expected: &str = r#"class LrSchedulerConfig:
    class WarmUp:
        def __init__(self, values: dict = None):
            values = values if values is not None else {}
            self.start: float = values.get("start", 0.0)
            self.steps: int = values.get("steps", 0)

    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.lr_decay: float = values.get("lr_decay", 0.1)
        self.warm_up = self.WarmUp(values=values.get("warm_up"))
        self.mode: str = values.get("mode", 'cos')
"#;

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
        let inner: usize = actual.find("class WarmUp:").expect("inner class");
        let outer_init: usize = actual.find("self.WarmUp(").expect("outer constructor");
        assert!(inner < outer_init);
    }

    #[test]
    fn generate_flat_array_property_imports_list() {
        let schema: Value = json!({
            "title": "schedule",
            "type": "object",
            "properties": {
                "milestones": {
                    "type": "array",
                    "items": { "type": "number" },
                    "default": [0.4, 0.7]
                },
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        });

        let expected: &str = r#"from typing import List


class Schedule:
    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.milestones: List[float] = values.get("milestones", [0.4, 0.7])
        self.tags: List[str] = values.get("tags", None)
"#;

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
        assert!(!actual.contains("class Milestones"));
    }

    #[test]
    fn generate_array_of_objects_wraps_list() {
        let schema: Value = json!({
            "title": "days",
            "type": "array",
            "items": {
                "type": "object",
                "properties": { "date": { "type": "integer" } }
            }
        });

        let expected: &str = r#"class Days(list):
    class Items:
        def __init__(self, values: dict = None):
            values = values if values is not None else {}
            self.date: int = values.get("date", None)

    def __init__(self, values: list = None):
        super().__init__()
        values = values if values is not None else []
        self[:] = [self.Items(value) for value in values]
"#;

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_root_flat_array_still_emits_class() {
        let schema: Value = json!({
            "title": "ids",
            "type": "array",
            "items": { "type": "integer" },
            "default": [1]
        });

        let expected: &str = r"class Ids(list):
    def __init__(self, values: list = None):
        super().__init__()
        values = values if values is not None else [1]
        self[:] = values
";

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_definitions_and_references() {
        let schema: Value = json!({
            "title": "shape",
            "type": "object",
            "definitions": {
                "point": { "type": "object", "properties": { "x": { "type": "integer" } } }
            },
            "properties": {
                "origin": { "$ref": "#/definitions/point" },
                "corners": { "type": "array", "items": { "$ref": "#/definitions/point" } }
            }
        });

        let expected: &str = r#"class Point:
    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.x: int = values.get("x", None)


class Shape:
    class Corners(list):
        def __init__(self, values: list = None):
            super().__init__()
            values = values if values is not None else []
            self[:] = [Point(value) for value in values]

    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.origin = Point(values=values.get("origin"))
        self.corners = self.Corners(values=values.get("corners"))
"#;

        let actual: String = generate_default(&schema);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_with_repr() {
        let schema: Value = json!({
            "title": "warm_up",
            "type": "object",
            "properties": {
                "start": { "type": "number", "default": 0.2 },
                "steps": { "type": "integer", "default": 1024 }
            }
        });
        let settings: GenerateSettings = GenerateSettings {
            generate_repr: true,
            ..GenerateSettings::default()
        };

        let expected: &str = r#"class WarmUp:
    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        self.start: float = values.get("start", 0.2)
        self.steps: int = values.get("steps", 1024)

    def __repr__(self) -> str:
        return f'WarmUp[start: {self.start}, steps: {self.steps}]'
"#;

        let actual: String = generate_with(&schema, &settings);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_repr_without_properties() {
        let schema: Value = json!({ "title": "empty", "type": "object", "properties": {} });
        let settings: GenerateSettings = GenerateSettings {
            generate_repr: true,
            ..GenerateSettings::default()
        };
        let actual: String = generate_with(&schema, &settings);
        assert!(actual.ends_with("        return 'Empty[]'\n"));
    }

    #[test]
    fn generate_with_validate_embeds_schema() {
        let schema: Value = serde_json::from_str(
            r#"{
                "title": "point",
                "type": "object",
                "properties": { "x": { "type": "integer" } }
            }"#,
        )
        .expect("valid json");
        let settings: GenerateSettings = GenerateSettings {
            generate_validate: true,
            ..GenerateSettings::default()
        };

        let expected: &str = r#"import json
import jsonschema


class Point:
    _schema = json.loads('{"title":"point","type":"object","properties":{"x":{"type":"integer"}}}')

    def __init__(self, values: dict = None):
        values = values if values is not None else {}
        jsonschema.validate(values, self._schema)
        self.x: int = values.get("x", None)
"#;

        let actual: String = generate_with(&schema, &settings);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_with_validate_attaches_definitions_to_fragments() {
        let schema: Value = serde_json::from_str(
            r##"{
                "title": "shape",
                "type": "object",
                "definitions": { "point": { "type": "object", "properties": {} } },
                "properties": {
                    "corners": { "type": "array", "items": { "$ref": "#/definitions/point" } }
                }
            }"##,
        )
        .expect("valid json");
        let settings: GenerateSettings = GenerateSettings {
            generate_validate: true,
            ..GenerateSettings::default()
        };

        let actual: String = generate_with(&schema, &settings);
        let expected_line: &str = r##"        _schema = json.loads('{"type":"array","items":{"$ref":"#/definitions/point"},"definitions":{"point":{"type":"object","properties":{}}}}')"##;
        assert!(
            actual.lines().any(|line| line == expected_line),
            "list fragment should carry definitions:\n{actual}"
        );
        assert_eq!(
            3,
            actual.matches("\"definitions\":{\"point\"").count(),
            "root keeps its own definitions, definition and list fragments get them attached"
        );
    }

    #[test]
    fn generate_scalar_root_is_not_emittable() {
        let schema: Value = json!({ "title": "miss", "type": "number", "default": 3.26 });
        let parsed: ParsedSchema = parse(&schema).expect("schema should parse");
        let result = generate(&parsed, &schema, &GenerateSettings::default());
        assert!(matches!(
            result,
            Err(JsonSchemaToClassError::NotEmittable { ref name, kind: "float" }) if name == "miss"
        ));
    }

    #[test]
    fn generate_reference_root_is_not_emittable() {
        let schema: Value = json!({
            "title": "snow",
            "$ref": "#/definitions/miss",
            "definitions": { "miss": { "type": "number", "default": 3.26 } }
        });
        let parsed: ParsedSchema = parse(&schema).expect("schema should parse");
        let result = generate(&parsed, &schema, &GenerateSettings::default());
        assert!(matches!(
            result,
            Err(JsonSchemaToClassError::NotEmittable { .. })
        ));
    }

    #[test]
    fn generate_honors_indent_and_line_break() {
        let schema: Value = json!({
            "title": "p",
            "type": "object",
            "properties": { "x": { "type": "boolean", "default": true } }
        });
        let settings: GenerateSettings = GenerateSettings {
            indent: 2,
            line_break: "\r\n".to_string(),
            ..GenerateSettings::default()
        };
        let expected: &str = "class P:\r\n  def __init__(self, values: dict = None):\r\n    values = values if values is not None else {}\r\n    self.x: bool = values.get(\"x\", True)\r\n";
        assert_eq!(expected, generate_with(&schema, &settings));
    }

    #[test]
    fn generate_is_deterministic_and_flag_is_call_scoped() {
        let with_list: Value = json!({
            "title": "a",
            "type": "object",
            "properties": { "xs": { "type": "array", "items": { "type": "integer" } } }
        });
        let without_list: Value = json!({
            "title": "b",
            "type": "object",
            "properties": { "x": { "type": "integer" } }
        });
        let first: String = generate_default(&with_list);
        let second: String = generate_default(&with_list);
        assert_eq!(first, second);
        assert!(first.starts_with("from typing import List"));
        assert!(!generate_default(&without_list).contains("typing"));
    }

    #[test]
    fn generate_sanitizes_attribute_names() {
        let schema: Value = json!({
            "title": "record",
            "type": "object",
            "properties": { "foo-bar": { "type": "string", "default": "it's" } }
        });
        let actual: String = generate_default(&schema);
        assert!(actual.contains(r#"self.foo_bar: str = values.get("foo-bar", "it's")"#));
    }

    #[test]
    fn generate_object_default_mapping() {
        let schema: Value = json!({
            "title": "opts",
            "type": "object",
            "default": { "x": 1 },
            "properties": { "x": { "type": "integer" } }
        });
        let actual: String = generate_default(&schema);
        assert!(actual.contains("values = values if values is not None else {'x': 1}"));
    }
}
