//! Typed model of an actor's declared input schema
//!
//! Actors describe their accepted parameters with a JSON-Schema-like
//! document (property name → type, optional enum/bounds/description). The
//! gateway passes that document through untouched; this module parses it
//! into a typed form model so every field kind gets an exhaustive handler
//! instead of string-tag dispatch.

use serde_json::Value;

/// Kind of a single input field, with the constraints that matter for
/// editing it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Enum(Vec<String>),
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    Boolean,
    /// Edited as raw JSON text and parsed on change.
    Array,
    /// Edited as raw JSON text and parsed on change.
    Object,
}

impl FieldKind {
    /// Short label for display next to the field name.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Enum(_) => "enum",
            FieldKind::Number { .. } => "number",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        }
    }
}

/// One declared property of the input schema.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    pub kind: FieldKind,
    pub description: Option<String>,
}

/// Parsed input schema: the declared properties plus which of them are
/// required.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    pub title: Option<String>,
    pub properties: Vec<(String, PropertySchema)>,
    pub required: Vec<String>,
}

impl InputSchema {
    /// Parses the untyped schema document an actor declares.
    ///
    /// Returns `None` when there is no schema or it declares no properties;
    /// the caller then falls back to raw JSON input only.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        let obj = value?.as_object()?;
        let props = obj.get("properties")?.as_object()?;

        let properties: Vec<(String, PropertySchema)> = props
            .iter()
            .map(|(name, prop)| (name.clone(), parse_property(prop)))
            .collect();

        if properties.is_empty() {
            return None;
        }

        let required = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            title: obj.get("title").and_then(Value::as_str).map(str::to_string),
            properties,
            required,
        })
    }
}

/// One editable control of the generated form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<String>,
    /// Seed value taken from the actor's default run input.
    pub default: Option<Value>,
}

/// The generated form: exactly one field per declared schema property.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builds the editable form for a schema, seeding each field from the
/// actor's default run input.
pub fn build_form(schema: &InputSchema, defaults: &Value) -> Form {
    let defaults = defaults.as_object();

    let fields = schema
        .properties
        .iter()
        .map(|(name, prop)| FormField {
            name: name.clone(),
            kind: prop.kind.clone(),
            required: schema.required.iter().any(|r| r == name),
            description: prop.description.clone(),
            default: defaults.and_then(|d| d.get(name)).cloned(),
        })
        .collect();

    Form { fields }
}

fn parse_property(prop: &Value) -> PropertySchema {
    let description = prop
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    let kind = match prop.get("type").and_then(Value::as_str) {
        Some("string") => match prop.get("enum").and_then(Value::as_array) {
            Some(options) => FieldKind::Enum(
                options
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            None => FieldKind::String,
        },
        Some("number") => FieldKind::Number {
            minimum: prop.get("minimum").and_then(Value::as_f64),
            maximum: prop.get("maximum").and_then(Value::as_f64),
        },
        Some("integer") => FieldKind::Integer {
            minimum: prop.get("minimum").and_then(Value::as_i64),
            maximum: prop.get("maximum").and_then(Value::as_i64),
        },
        Some("boolean") => FieldKind::Boolean,
        Some("array") => FieldKind::Array,
        Some("object") => FieldKind::Object,
        // Undeclared or unknown types fall back to free text.
        _ => FieldKind::String,
    };

    PropertySchema { kind, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "title": "Scraper input",
            "type": "object",
            "properties": {
                "startUrl": { "type": "string", "description": "Where to begin" },
                "mode": { "type": "string", "enum": ["fast", "thorough"] },
                "maxPages": { "type": "integer", "minimum": 1, "maximum": 500 },
                "threshold": { "type": "number", "minimum": 0.5 },
                "headless": { "type": "boolean" },
                "selectors": { "type": "array" },
                "proxy": { "type": "object" },
                "mystery": {}
            },
            "required": ["startUrl"]
        })
    }

    #[test]
    fn test_one_field_per_property() {
        let value = sample_schema();
        let schema = InputSchema::from_value(Some(&value)).unwrap();
        assert_eq!(schema.properties.len(), 8);

        let form = build_form(&schema, &json!({}));
        assert_eq!(form.fields.len(), 8);

        // Every declared property appears exactly once.
        for (name, _) in &schema.properties {
            assert_eq!(form.fields.iter().filter(|f| &f.name == name).count(), 1);
        }
    }

    #[test]
    fn test_field_kinds() {
        let value = sample_schema();
        let schema = InputSchema::from_value(Some(&value)).unwrap();
        let form = build_form(&schema, &json!({}));

        assert_eq!(form.field("startUrl").unwrap().kind, FieldKind::String);
        assert_eq!(
            form.field("mode").unwrap().kind,
            FieldKind::Enum(vec!["fast".to_string(), "thorough".to_string()])
        );
        assert_eq!(
            form.field("maxPages").unwrap().kind,
            FieldKind::Integer {
                minimum: Some(1),
                maximum: Some(500)
            }
        );
        assert_eq!(
            form.field("threshold").unwrap().kind,
            FieldKind::Number {
                minimum: Some(0.5),
                maximum: None
            }
        );
        assert_eq!(form.field("headless").unwrap().kind, FieldKind::Boolean);
        assert_eq!(form.field("selectors").unwrap().kind, FieldKind::Array);
        assert_eq!(form.field("proxy").unwrap().kind, FieldKind::Object);
        // Untyped properties degrade to free text.
        assert_eq!(form.field("mystery").unwrap().kind, FieldKind::String);
    }

    #[test]
    fn test_required_and_defaults() {
        let value = sample_schema();
        let schema = InputSchema::from_value(Some(&value)).unwrap();
        let form = build_form(&schema, &json!({ "maxPages": 25 }));

        assert!(form.field("startUrl").unwrap().required);
        assert!(!form.field("mode").unwrap().required);
        assert_eq!(form.field("maxPages").unwrap().default, Some(json!(25)));
        assert_eq!(form.field("headless").unwrap().default, None);
    }

    #[test]
    fn test_missing_or_empty_schema() {
        assert!(InputSchema::from_value(None).is_none());
        assert!(InputSchema::from_value(Some(&json!(null))).is_none());
        assert!(InputSchema::from_value(Some(&json!({ "type": "object" }))).is_none());
        assert!(
            InputSchema::from_value(Some(&json!({ "type": "object", "properties": {} })))
                .is_none()
        );
    }
}
