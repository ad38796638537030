//! Type and value rendering for diagnostics
//!
//! [`format_schema`] renders a schema as a structural type expression such as
//! `{id: integer, tags?: string[]}`. [`format_shape`] and [`format_literal`]
//! render runtime values for "expected vs. actual" messages. None of these
//! functions influence whether a value is valid.

use crate::constraints::Constraints;
use crate::schema::{ScalarSchema, Schema, SchemaKind, ShapeSchema};
use crate::types::{TypeTag, Value};
use crate::util::uniquify;

const UNDEFINED_SUFFIX: &str = " | undefined";

// ============================================================================
// Type Formatter
// ============================================================================

/// Render a schema as a human-readable type expression
///
/// ```
/// use ouroboros_schema::{format_schema, Schema};
///
/// let schema = Schema::shape()
///     .property("id", Schema::integer())
///     .property("name", Schema::string().optional());
/// assert_eq!(format_schema(&schema), "{id: integer, name?: string}");
/// ```
pub fn format_schema(schema: &Schema) -> String {
    let mut alternatives = match &schema.kind {
        SchemaKind::Shape(shape) => vec![format_properties(shape)],
        SchemaKind::Alternation(members) => {
            let rendered: Vec<String> = members.iter().map(format_schema).collect();
            uniquify(&rendered)
        }
        SchemaKind::Scalar(scalar) => vec![format_scalar(scalar, &schema.constraints)],
    };

    if schema.nullable {
        alternatives.push("null".to_string());
    }
    if schema.optional {
        alternatives.push("undefined".to_string());
    }

    alternatives.join(" | ")
}

/// Render a property shape as `{key: Type, key?: Type}`
pub fn format_properties(shape: &ShapeSchema) -> String {
    let pairs: Vec<String> = shape
        .properties
        .iter()
        .map(|(key, nested)| {
            let rendered = format_schema(nested);
            if nested.optional {
                let rendered = rendered.strip_suffix(UNDEFINED_SUFFIX).unwrap_or(&rendered);
                format!("{}?: {}", key, rendered)
            } else {
                format!("{}: {}", key, rendered)
            }
        })
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

fn format_scalar(scalar: &ScalarSchema, constraints: &Constraints) -> String {
    let structured = scalar.shape.is_some() || scalar.tag == TypeTag::Array;
    let body = match &scalar.shape {
        Some(shape) => format_properties(shape),
        None if scalar.tag == TypeTag::Array => format_array(scalar, constraints),
        None => scalar.tag.to_string(),
    };

    let instances = scalar.accepted_instances();
    if instances.is_empty() || structured {
        return body;
    }

    instances
        .iter()
        .map(|class| {
            if scalar.tag == TypeTag::Any {
                class.to_string()
            } else {
                format!("{} & {}", scalar.tag, class)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_array(scalar: &ScalarSchema, constraints: &Constraints) -> String {
    let items = scalar.items();
    let rendered: Vec<String> = items.iter().map(format_schema).collect();

    if scalar.keep_order {
        let mut slots = rendered;
        if !scalar.keep_length {
            slots.push("...".to_string());
        }
        return format!("[{}]", slots.join(", "));
    }

    let unique = uniquify(&rendered);
    let mut element = unique.join(" | ");
    if unique.len() > 1 {
        element = format!("({})", element);
    }

    if scalar.keep_length {
        let min = constraints
            .min
            .filter(|m| m.is_finite() && *m > 0.0)
            .map(|m| m as usize)
            .unwrap_or(0);
        format!("{}[{}]", element, items.len().max(min))
    } else {
        format!("{}[]", element)
    }
}

// ============================================================================
// Value Formatter
// ============================================================================

/// Render the shape of a runtime value
///
/// Scalars render as their kind, object literals and lists recursively, and
/// class instances as their class name.
///
/// ```
/// use ouroboros_schema::{format_shape, Value};
///
/// let value = Value::object([("id", Value::Int(1)), ("tags", Value::List(vec![Value::from("a")]))]);
/// assert_eq!(format_shape(&value), "{id: number, tags: [string]}");
/// ```
pub fn format_shape(value: &Value) -> String {
    match value {
        Value::List(items) => {
            let shapes: Vec<String> = items.iter().map(format_shape).collect();
            format!("[{}]", shapes.join(", "))
        }
        Value::Object(fields) => {
            let shapes: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", key, format_shape(value)))
                .collect();
            format!("{{{}}}", shapes.join(", "))
        }
        Value::Instance { class, .. } => class.clone(),
        other => other.type_name().to_string(),
    }
}

/// Render the literal text of a runtime value
///
/// ```
/// use ouroboros_schema::{format_literal, Value};
///
/// assert_eq!(format_literal(&Value::from("say \"hi\"")), r#""say \"hi\"""#);
/// assert_eq!(format_literal(&Value::List(vec![Value::Int(1), Value::Bool(true)])), "[1, true]");
/// ```
pub fn format_literal(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::BigInt(i) => format!("{}n", i),
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Symbol(description) => format!("Symbol({})", description),
        Value::Function(name) => format!("[Function: {}]", name),
        Value::List(items) => {
            let literals: Vec<String> = items.iter().map(format_literal).collect();
            format!("[{}]", literals.join(", "))
        }
        Value::Object(fields) => {
            let literals: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", key, format_literal(value)))
                .collect();
            format!("{{{}}}", literals.join(", "))
        }
        Value::Instance { class, .. } => format!("[object {}]", class),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}
