//! JSON interop
//!
//! Conversions between `serde_json::Value` and [`Value`], and loading of
//! schema descriptors written as JSON objects:
//!
//! ```json
//! {
//!   "properties": {
//!     "id": { "type": "integer", "min": 1 },
//!     "tags": { "type": "array", "items": [{ "type": "string" }] },
//!     "/^x_/": { "type": "number", "optional": true }
//!   }
//! }
//! ```

use regex::Regex;
use serde_json::{Map, Number, Value as JsonValue};

use crate::errors::SchemaError;
use crate::patterns::KeyPattern;
use crate::schema::{ScalarSchema, Schema, SchemaKind, ShapeSchema};
use crate::types::{TypeTag, Value};

type JsonObject = Map<String, JsonValue>;

// ============================================================================
// Value Conversions
// ============================================================================

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(fields) => {
                Value::Object(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::BigInt(i128::from(u))
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined | Value::Null | Value::Function(_) => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Int(i) => JsonValue::from(i),
            // Non-finite floats have no JSON form
            Value::Float(f) => Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
            Value::BigInt(i) => {
                if let Ok(small) = i64::try_from(i) {
                    JsonValue::from(small)
                } else if let Ok(unsigned) = u64::try_from(i) {
                    JsonValue::from(unsigned)
                } else {
                    JsonValue::String(i.to_string())
                }
            }
            Value::String(s) | Value::Symbol(s) => JsonValue::String(s),
            Value::List(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Value::Object(fields) | Value::Instance { fields, .. } => {
                JsonValue::Object(fields.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// Schema Descriptors
// ============================================================================

impl Schema {
    /// Build a schema from a JSON descriptor
    ///
    /// ```
    /// use ouroboros_schema::{Schema, Value, validate};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_json(&json!({
    ///     "types": [{ "type": "string" }, { "type": "number" }],
    ///     "nullable": true
    /// })).unwrap();
    ///
    /// assert!(validate(&Value::from("5"), &schema).is_ok());
    /// assert!(validate(&Value::Null, &schema).is_ok());
    /// assert!(validate(&Value::Bool(true), &schema).is_err());
    /// ```
    pub fn from_json(descriptor: &JsonValue) -> Result<Self, SchemaError> {
        schema_from_json(descriptor)
    }
}

/// Convert a JSON schema descriptor into a [`Schema`]
///
/// A descriptor with `types` becomes an alternation; one with `type` a
/// type-tagged node, carrying a nested shape when `properties` is also given;
/// one with only `properties` an object shape. A descriptor with none of
/// these accepts any defined, non-null value.
pub fn schema_from_json(descriptor: &JsonValue) -> Result<Schema, SchemaError> {
    let object = descriptor.as_object().ok_or(SchemaError::NotAnObject)?;

    let kind = if let Some(types) = object.get("types") {
        let alternatives = types
            .as_array()
            .ok_or_else(|| invalid_field("types", "an array of descriptors"))?
            .iter()
            .map(schema_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        SchemaKind::Alternation(alternatives)
    } else {
        match (object.get("type"), object.get("properties")) {
            (None, Some(properties)) => SchemaKind::Shape(parse_properties(properties)?),
            (tag, properties) => {
                let tag = match tag {
                    Some(tag) => tag
                        .as_str()
                        .ok_or_else(|| invalid_field("type", "a string"))?
                        .parse::<TypeTag>()?,
                    None => TypeTag::Any,
                };
                let mut scalar = parse_scalar(object, tag)?;
                if let Some(properties) = properties {
                    scalar.shape = Some(parse_properties(properties)?);
                }
                SchemaKind::Scalar(scalar)
            }
        }
    };

    let mut schema = Schema::new(kind);
    schema.nullable = get_bool(object, "nullable")?.unwrap_or(false);
    schema.optional = get_bool(object, "optional")?.unwrap_or(false);
    schema.default_value = object.get("defaultValue").map(Value::from);

    let constraints = &mut schema.constraints;
    constraints.empty = get_bool(object, "empty")?.unwrap_or(true);
    constraints.min = get_number(object, "min")?;
    constraints.max = get_number(object, "max")?;
    constraints.length = get_length(object, "length")?;
    constraints.pattern = get_pattern(object, "match")?;
    constraints.equals = object.get("equals").map(Value::from);
    constraints.contains = match object.get("contains") {
        Some(values) => Some(
            values
                .as_array()
                .ok_or_else(|| invalid_field("contains", "an array"))?
                .iter()
                .map(Value::from)
                .collect(),
        ),
        None => None,
    };

    Ok(schema)
}

fn parse_scalar(object: &JsonObject, tag: TypeTag) -> Result<ScalarSchema, SchemaError> {
    let mut scalar = ScalarSchema::new(tag);

    scalar.instance = get_string(object, "instance")?;
    if let Some(instances) = object.get("instances") {
        let names = instances
            .as_array()
            .ok_or_else(|| invalid_field("instances", "an array of class names"))?
            .iter()
            .map(|name| {
                name.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid_field("instances", "an array of class names"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        scalar.instances = Some(names);
    }

    if let Some(items) = object.get("items") {
        let items = items
            .as_array()
            .ok_or_else(|| invalid_field("items", "an array of descriptors"))?
            .iter()
            .map(schema_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        scalar.items = Some(items);
    }

    scalar.keep_order = get_bool(object, "keepOrder")?.unwrap_or(false);
    scalar.keep_length = get_bool(object, "keepLength")?.unwrap_or(false);

    Ok(scalar)
}

fn parse_properties(properties: &JsonValue) -> Result<ShapeSchema, SchemaError> {
    let properties = properties
        .as_object()
        .ok_or_else(|| invalid_field("properties", "an object of descriptors"))?;

    let mut shape = ShapeSchema::new();
    for (key, descriptor) in properties {
        shape = shape.property(key.as_str(), schema_from_json(descriptor)?);
    }
    Ok(shape)
}

// ============================================================================
// Field Helpers
// ============================================================================

fn invalid_field(field: &str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidField {
        field: field.to_string(),
        expected,
    }
}

fn get_bool(object: &JsonObject, field: &str) -> Result<Option<bool>, SchemaError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid_field(field, "a boolean")),
    }
}

fn get_number(object: &JsonObject, field: &str) -> Result<Option<f64>, SchemaError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid_field(field, "a number")),
    }
}

fn get_length(object: &JsonObject, field: &str) -> Result<Option<usize>, SchemaError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid_field(field, "a non-negative integer")),
    }
}

fn get_string(object: &JsonObject, field: &str) -> Result<Option<String>, SchemaError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid_field(field, "a string")),
    }
}

/// `match` accepts either plain regex text or a `/pattern/flags` literal
fn get_pattern(object: &JsonObject, field: &str) -> Result<Option<Regex>, SchemaError> {
    let Some(source) = get_string(object, field)? else {
        return Ok(None);
    };
    let regex = match KeyPattern::parse(&source) {
        Some(literal) => literal.compile()?,
        None => Regex::new(&source).map_err(|source_err| SchemaError::InvalidRegex {
            pattern: source.clone(),
            source: source_err,
        })?,
    };
    Ok(Some(regex))
}
