//! JSON Schema support for tool arguments.
//!
//! One type serves two purposes: validating incoming tool arguments and
//! describing the tool in `tools/list` output. Serialization of the enum is
//! the descriptive form, so the validation schema and the advertised schema
//! cannot drift apart. The `validate` walker is exhaustive over every shape
//! the enum can express.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A JSON Schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum JsonSchema {
    /// String type
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
        #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<String>>,
    },
    /// Number type
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    /// Integer type
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
    },
    /// Boolean type
    Boolean {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Array type
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        items: Option<Box<JsonSchema>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_items: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<u64>,
    },
    /// Object type
    Object {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        properties: Option<HashMap<String, JsonSchema>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        required: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        additional_properties: Option<bool>,
    },
}

impl JsonSchema {
    /// Create a string schema
    pub fn string() -> Self {
        Self::String {
            description: None,
            min_length: None,
            max_length: None,
            enum_values: None,
        }
    }

    /// Create a string enum schema
    pub fn string_enum(values: Vec<String>) -> Self {
        Self::String {
            description: None,
            min_length: None,
            max_length: None,
            enum_values: Some(values),
        }
    }

    /// Create a number schema
    pub fn number() -> Self {
        Self::Number {
            description: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Create an integer schema
    pub fn integer() -> Self {
        Self::Integer {
            description: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a boolean schema
    pub fn boolean() -> Self {
        Self::Boolean { description: None }
    }

    /// Create an array schema
    pub fn array(items: JsonSchema) -> Self {
        Self::Array {
            description: None,
            items: Some(Box::new(items)),
            min_items: None,
            max_items: None,
        }
    }

    /// Create an object schema
    pub fn object() -> Self {
        Self::Object {
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    /// Add description to any schema
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        match &mut self {
            JsonSchema::String { description: d, .. } => *d = Some(description.into()),
            JsonSchema::Number { description: d, .. } => *d = Some(description.into()),
            JsonSchema::Integer { description: d, .. } => *d = Some(description.into()),
            JsonSchema::Boolean { description: d } => *d = Some(description.into()),
            JsonSchema::Array { description: d, .. } => *d = Some(description.into()),
            JsonSchema::Object { description: d, .. } => *d = Some(description.into()),
        }
        self
    }

    /// Add properties to object schema
    pub fn with_properties(mut self, props: HashMap<String, JsonSchema>) -> Self {
        if let JsonSchema::Object { properties, .. } = &mut self {
            *properties = Some(props);
        }
        self
    }

    /// Add required fields to object schema
    pub fn with_required(mut self, fields: Vec<String>) -> Self {
        if let JsonSchema::Object { required, .. } = &mut self {
            *required = Some(fields);
        }
        self
    }

    /// Add minimum constraint to numeric schema
    pub fn with_minimum(mut self, min: f64) -> Self {
        match &mut self {
            JsonSchema::Number { minimum, .. } => *minimum = Some(min),
            JsonSchema::Integer { minimum, .. } => *minimum = Some(min as i64),
            _ => {}
        }
        self
    }

    /// Add maximum constraint to numeric schema
    pub fn with_maximum(mut self, max: f64) -> Self {
        match &mut self {
            JsonSchema::Number { maximum, .. } => *maximum = Some(max),
            JsonSchema::Integer { maximum, .. } => *maximum = Some(max as i64),
            _ => {}
        }
        self
    }

    /// The descriptive JSON-Schema form advertised by `tools/list`
    pub fn describe(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Validate a JSON value against this schema.
    ///
    /// Covers every variant and every constraint the enum can express; an
    /// unsupported shape cannot be constructed, so validation and the
    /// advertised description always agree.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), String> {
        match self {
            JsonSchema::String {
                min_length,
                max_length,
                enum_values,
                ..
            } => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("{}: expected string, got {}", path, type_name(value)))?;
                if let Some(min) = min_length {
                    if (s.chars().count() as u64) < *min {
                        return Err(format!("{}: string shorter than {} characters", path, min));
                    }
                }
                if let Some(max) = max_length {
                    if (s.chars().count() as u64) > *max {
                        return Err(format!("{}: string longer than {} characters", path, max));
                    }
                }
                if let Some(allowed) = enum_values {
                    if !allowed.iter().any(|v| v == s) {
                        return Err(format!(
                            "{}: '{}' is not one of {:?}",
                            path, s, allowed
                        ));
                    }
                }
                Ok(())
            }
            JsonSchema::Number {
                minimum, maximum, ..
            } => {
                let n = value
                    .as_f64()
                    .ok_or_else(|| format!("{}: expected number, got {}", path, type_name(value)))?;
                if let Some(min) = minimum {
                    if n < *min {
                        return Err(format!("{}: {} is below minimum {}", path, n, min));
                    }
                }
                if let Some(max) = maximum {
                    if n > *max {
                        return Err(format!("{}: {} is above maximum {}", path, n, max));
                    }
                }
                Ok(())
            }
            JsonSchema::Integer {
                minimum, maximum, ..
            } => {
                let n = value.as_i64().ok_or_else(|| {
                    format!("{}: expected integer, got {}", path, type_name(value))
                })?;
                if let Some(min) = minimum {
                    if n < *min {
                        return Err(format!("{}: {} is below minimum {}", path, n, min));
                    }
                }
                if let Some(max) = maximum {
                    if n > *max {
                        return Err(format!("{}: {} is above maximum {}", path, n, max));
                    }
                }
                Ok(())
            }
            JsonSchema::Boolean { .. } => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!(
                        "{}: expected boolean, got {}",
                        path,
                        type_name(value)
                    ))
                }
            }
            JsonSchema::Array {
                items,
                min_items,
                max_items,
                ..
            } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("{}: expected array, got {}", path, type_name(value)))?;
                if let Some(min) = min_items {
                    if (arr.len() as u64) < *min {
                        return Err(format!("{}: fewer than {} items", path, min));
                    }
                }
                if let Some(max) = max_items {
                    if (arr.len() as u64) > *max {
                        return Err(format!("{}: more than {} items", path, max));
                    }
                }
                if let Some(item_schema) = items {
                    for (i, item) in arr.iter().enumerate() {
                        item_schema.validate_at(item, &format!("{}[{}]", path, i))?;
                    }
                }
                Ok(())
            }
            JsonSchema::Object {
                properties,
                required,
                additional_properties,
                ..
            } => {
                let obj = value.as_object().ok_or_else(|| {
                    format!("{}: expected object, got {}", path, type_name(value))
                })?;
                if let Some(required) = required {
                    for field in required {
                        if !obj.contains_key(field) {
                            return Err(format!("{}: missing required property '{}'", path, field));
                        }
                    }
                }
                if let Some(properties) = properties {
                    for (key, item) in obj {
                        match properties.get(key) {
                            Some(schema) => {
                                schema.validate_at(item, &format!("{}.{}", path, key))?
                            }
                            None => {
                                if *additional_properties == Some(false) {
                                    return Err(format!(
                                        "{}: unexpected property '{}'",
                                        path, key
                                    ));
                                }
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
