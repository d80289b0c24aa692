//! Editable run input with form/raw-text synchronization
//!
//! An [`InputConfig`] is the single source of truth for the input payload
//! sent when a run starts. It can be edited two ways: field by field (the
//! structured form view) or wholesale as raw JSON text. The two views stay
//! consistent by construction: a field edit re-serializes the whole config,
//! and a raw-text edit that parses replaces the whole config. Raw text that
//! fails to parse is rejected and the config is left unchanged.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{FieldKind, FormField};

/// Errors raised while editing an input configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("field '{field}' is not valid JSON: {reason}")]
    InvalidFieldJson { field: String, reason: String },

    #[error("field '{field}' expects {expected}, got '{value}'")]
    InvalidValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("field '{field}' must be one of [{options}]")]
    UnknownVariant { field: String, options: String },

    #[error("field '{field}' must be between {minimum} and {maximum}")]
    OutOfRange {
        field: String,
        minimum: String,
        maximum: String,
    },

    #[error("input is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("input must be a JSON object")]
    NotAnObject,
}

/// The input payload for a run, keyed by property name.
///
/// Values are stored as plain JSON; absent and empty fields are removed
/// rather than kept as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputConfig {
    values: Map<String, Value>,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a config from an actor's default run input. Non-object
    /// defaults yield an empty config.
    pub fn from_defaults(defaults: &Value) -> Self {
        Self {
            values: defaults.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Applies one structured-form edit. An empty raw value clears the
    /// field; anything else is parsed according to the field's kind.
    pub fn apply_field(&mut self, field: &FormField, raw: &str) -> Result<(), InputError> {
        let raw = raw.trim();

        if raw.is_empty() {
            self.values.remove(&field.name);
            return Ok(());
        }

        let value = parse_field_value(field, raw)?;
        self.values.insert(field.name.clone(), value);
        Ok(())
    }

    /// Replaces the whole config from the raw-text view.
    ///
    /// Text that does not parse as a JSON object is rejected and the
    /// current config is left untouched.
    pub fn apply_raw_text(&mut self, text: &str) -> Result<(), InputError> {
        let text = text.trim();
        let parsed: Value = if text.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(text).map_err(|e| InputError::InvalidJson(e.to_string()))?
        };

        match parsed {
            Value::Object(values) => {
                self.values = values;
                Ok(())
            }
            _ => Err(InputError::NotAnObject),
        }
    }

    /// Serializes the config for the raw-text view.
    pub fn to_raw_text(&self) -> String {
        // A Map always serializes.
        serde_json::to_string_pretty(&Value::Object(self.values.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

fn parse_field_value(field: &FormField, raw: &str) -> Result<Value, InputError> {
    match &field.kind {
        FieldKind::String => Ok(Value::String(raw.to_string())),

        FieldKind::Enum(options) => {
            if options.iter().any(|o| o == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(InputError::UnknownVariant {
                    field: field.name.clone(),
                    options: options.join(", "),
                })
            }
        }

        FieldKind::Number { minimum, maximum } => {
            let n: f64 = raw.parse().map_err(|_| InputError::InvalidValue {
                field: field.name.clone(),
                expected: "a number",
                value: raw.to_string(),
            })?;
            check_range(&field.name, n, *minimum, *maximum)?;
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| InputError::InvalidValue {
                    field: field.name.clone(),
                    expected: "a finite number",
                    value: raw.to_string(),
                })
        }

        FieldKind::Integer { minimum, maximum } => {
            let n: i64 = raw.parse().map_err(|_| InputError::InvalidValue {
                field: field.name.clone(),
                expected: "an integer",
                value: raw.to_string(),
            })?;
            check_range(&field.name, n, *minimum, *maximum)?;
            Ok(Value::Number(n.into()))
        }

        FieldKind::Boolean => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(InputError::InvalidValue {
                field: field.name.clone(),
                expected: "true or false",
                value: raw.to_string(),
            }),
        },

        // Arrays and objects are edited as raw JSON text. A parse failure
        // rejects the edit instead of falling back to storing the text.
        FieldKind::Array => {
            let value: Value =
                serde_json::from_str(raw).map_err(|e| InputError::InvalidFieldJson {
                    field: field.name.clone(),
                    reason: e.to_string(),
                })?;
            if value.is_array() {
                Ok(value)
            } else {
                Err(InputError::InvalidValue {
                    field: field.name.clone(),
                    expected: "a JSON array",
                    value: raw.to_string(),
                })
            }
        }

        FieldKind::Object => {
            let value: Value =
                serde_json::from_str(raw).map_err(|e| InputError::InvalidFieldJson {
                    field: field.name.clone(),
                    reason: e.to_string(),
                })?;
            if value.is_object() {
                Ok(value)
            } else {
                Err(InputError::InvalidValue {
                    field: field.name.clone(),
                    expected: "a JSON object",
                    value: raw.to_string(),
                })
            }
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    value: T,
    minimum: Option<T>,
    maximum: Option<T>,
) -> Result<(), InputError> {
    let below = minimum.as_ref().is_some_and(|m| value < *m);
    let above = maximum.as_ref().is_some_and(|m| value > *m);

    if below || above {
        return Err(InputError::OutOfRange {
            field: field.to_string(),
            minimum: minimum.map_or("-inf".to_string(), |m| m.to_string()),
            maximum: maximum.map_or("+inf".to_string(), |m| m.to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InputSchema, build_form};
    use serde_json::json;

    fn field(name: &str, kind: FieldKind) -> FormField {
        FormField {
            name: name.to_string(),
            kind,
            required: false,
            description: None,
            default: None,
        }
    }

    #[test]
    fn test_raw_text_round_trip() {
        let schema_doc = json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" },
                "maxPages": { "type": "integer" },
                "headless": { "type": "boolean" }
            }
        });
        let schema = InputSchema::from_value(Some(&schema_doc)).unwrap();
        let form = build_form(&schema, &json!({ "url": "https://example.com" }));

        let mut config = InputConfig::from_defaults(&json!({ "url": "https://example.com" }));
        config
            .apply_field(form.field("maxPages").unwrap(), "10")
            .unwrap();
        config
            .apply_field(form.field("headless").unwrap(), "true")
            .unwrap();

        let text = config.to_raw_text();
        let mut reparsed = InputConfig::new();
        reparsed.apply_raw_text(&text).unwrap();

        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_invalid_raw_text_leaves_config_unchanged() {
        let mut config = InputConfig::from_defaults(&json!({ "url": "https://example.com" }));
        let before = config.clone();

        assert!(config.apply_raw_text("{ not json").is_err());
        assert_eq!(config, before);

        assert!(matches!(
            config.apply_raw_text("[1, 2, 3]"),
            Err(InputError::NotAnObject)
        ));
        assert_eq!(config, before);
    }

    #[test]
    fn test_empty_field_value_is_removed() {
        let mut config = InputConfig::from_defaults(&json!({ "url": "https://example.com" }));
        config
            .apply_field(&field("url", FieldKind::String), "")
            .unwrap();
        assert!(config.get("url").is_none());
        assert!(config.is_empty());
    }

    #[test]
    fn test_typed_field_parsing() {
        let mut config = InputConfig::new();

        config
            .apply_field(
                &field(
                    "maxPages",
                    FieldKind::Integer {
                        minimum: Some(1),
                        maximum: Some(100),
                    },
                ),
                "42",
            )
            .unwrap();
        assert_eq!(config.get("maxPages"), Some(&json!(42)));

        config
            .apply_field(&field("headless", FieldKind::Boolean), "false")
            .unwrap();
        assert_eq!(config.get("headless"), Some(&json!(false)));

        config
            .apply_field(&field("selectors", FieldKind::Array), r#"["a", "b"]"#)
            .unwrap();
        assert_eq!(config.get("selectors"), Some(&json!(["a", "b"])));

        let err = config
            .apply_field(&field("count", FieldKind::Integer { minimum: None, maximum: None }), "ten")
            .unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { .. }));
    }

    #[test]
    fn test_integer_bounds() {
        let f = field(
            "maxPages",
            FieldKind::Integer {
                minimum: Some(1),
                maximum: Some(100),
            },
        );

        let mut config = InputConfig::new();
        assert!(matches!(
            config.apply_field(&f, "500"),
            Err(InputError::OutOfRange { .. })
        ));
        assert!(config.get("maxPages").is_none());

        config.apply_field(&f, "100").unwrap();
        assert_eq!(config.get("maxPages"), Some(&json!(100)));
    }

    #[test]
    fn test_enum_rejects_unknown_variant() {
        let f = field(
            "mode",
            FieldKind::Enum(vec!["fast".to_string(), "thorough".to_string()]),
        );

        let mut config = InputConfig::new();
        assert!(matches!(
            config.apply_field(&f, "sloppy"),
            Err(InputError::UnknownVariant { .. })
        ));

        config.apply_field(&f, "fast").unwrap();
        assert_eq!(config.get("mode"), Some(&json!("fast")));
    }

    #[test]
    fn test_unparseable_array_edit_is_rejected() {
        let f = field("selectors", FieldKind::Array);

        let mut config = InputConfig::from_defaults(&json!({ "selectors": ["a"] }));
        let before = config.clone();

        assert!(config.apply_field(&f, "[broken").is_err());
        assert_eq!(config, before);

        // A parseable value of the wrong shape is also rejected.
        assert!(config.apply_field(&f, "{\"a\": 1}").is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_raw_edit_wins_over_previous_form_edits() {
        let mut config = InputConfig::new();
        config
            .apply_field(&field("url", FieldKind::String), "https://old.example")
            .unwrap();

        config
            .apply_raw_text(r#"{ "url": "https://new.example", "depth": 3 }"#)
            .unwrap();

        assert_eq!(config.get("url"), Some(&json!("https://new.example")));
        assert_eq!(config.get("depth"), Some(&json!(3)));
    }
}
