//! Core validation engine
//!
//! This module implements the recursive validation of runtime values against
//! schema descriptors. Validation stops at the first failing check; the
//! failure travels back up the recursion, collecting one path token per
//! enclosing frame.

use once_cell::sync::Lazy;
use tracing::{trace, warn};

use crate::config::ValidatorConfig;
use crate::constraints::Constraints;
use crate::errors::{FailureKind, ValidationFailure, ValidationResult};
use crate::format::{format_literal, format_properties, format_schema, format_shape};
use crate::patterns::{KeyPattern, PatternCache};
use crate::result::{failure, reject, success, PartialResult};
use crate::schema::{PropertyKey, ScalarSchema, Schema, SchemaKind, ShapeSchema};
use crate::types::{TypeTag, Value};
use crate::util::iter_pairs;

const ELEMENT_PREFIX: &str = "Invalid type of element in array!";
const SHAPE_PREFIX: &str = "Object does not match the schema!";

/// Shared validator behind [`validate`]
static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::new);

// ============================================================================
// Public API
// ============================================================================

/// Validate a value against a schema
///
/// This is the main entry point for validation. On success it returns the
/// matched value: the input itself for scalars, a freshly built mapping of the
/// declared properties for object shapes, the default value for an absent
/// optional value, and arrays with every validated element replaced by its
/// own matched value.
///
/// Key patterns are compiled once and cached in a process-wide validator for
/// the life of the program. Callers that build schemas with an unbounded set
/// of distinct `/pattern/` keys should own a [`Validator`] instead, so the
/// cache is dropped with it (or cleared through [`Validator::patterns`]).
///
/// # Example
///
/// ```
/// use ouroboros_schema::{Schema, Value, validate};
///
/// let schema = Schema::shape()
///     .property("name", Schema::string().non_empty())
///     .property("role", Schema::string().default_value("member"));
///
/// let value = Value::object([("name", Value::from("ada"))]);
/// let matched = validate(&value, &schema).unwrap();
/// assert_eq!(matched.get("role"), Some(&Value::from("member")));
///
/// let failure = validate(&Value::object([("name", Value::from(""))]), &schema).unwrap_err();
/// assert_eq!(failure.path, vec!["name"]);
/// ```
pub fn validate(value: &Value, schema: &Schema) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(value, schema)
}

/// Validation engine with its configuration and compiled-pattern cache
#[derive(Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
    patterns: PatternCache,
}

impl Validator {
    /// Create a validator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            patterns: PatternCache::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Compiled key patterns seen so far
    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Validate a value against a schema
    pub fn validate(&self, value: &Value, schema: &Schema) -> ValidationResult {
        let result = self.validate_node(value, schema, 0);
        if let Err(failure) = &result {
            trace!(
                kind = %failure.kind,
                path = %failure.path_string(),
                message = %failure.message,
                "validation failed"
            );
        }
        result
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn validate_node(&self, value: &Value, schema: &Schema, depth: usize) -> ValidationResult {
        if depth > self.config.max_depth {
            warn!(max_depth = self.config.max_depth, "schema nesting exceeds the depth limit");
            return failure(
                FailureKind::DepthExceeded,
                format!("Maximum schema depth of '{}' exceeded!", self.config.max_depth),
            );
        }

        match &schema.kind {
            SchemaKind::Shape(shape) => self.validate_shape(value, schema, shape, depth),
            SchemaKind::Alternation(alternatives) => {
                if let Some(exit) = absent_exit(value, schema) {
                    return exit;
                }
                let working = self.validate_alternatives(value, schema, alternatives, depth)?;
                self.validate_value_rules(working, schema)
            }
            SchemaKind::Scalar(scalar) => self.validate_scalar(value, schema, scalar, depth),
        }
    }

    // ========================================================================
    // Object Shapes
    // ========================================================================

    fn validate_shape(
        &self,
        value: &Value,
        schema: &Schema,
        shape: &ShapeSchema,
        depth: usize,
    ) -> ValidationResult {
        if let Some(exit) = absent_exit(value, schema) {
            return exit;
        }
        if value.fields().is_none() {
            return failure(
                FailureKind::ObjectShape,
                format!(
                    "Expected '{}', instead got '{}'!",
                    format_schema(schema),
                    format_shape(value)
                ),
            );
        }
        let matched = self.validate_properties(value, shape, depth)?;
        self.validate_value_rules(matched, schema)
    }

    fn validate_properties(&self, value: &Value, shape: &ShapeSchema, depth: usize) -> ValidationResult {
        let mut matched: Vec<(String, Value)> = Vec::new();

        for (key, nested) in &shape.properties {
            match key {
                PropertyKey::Literal(name) => {
                    let field = value.get(name).unwrap_or(&Value::Undefined);
                    let output = self
                        .validate_node(field, nested, depth + 1)
                        .map_err(|f| f.prefixed(name.as_str()))?;
                    store(&mut matched, name, output);
                }
                PropertyKey::Pattern(pattern) => {
                    self.validate_pattern_key(value, pattern, nested, depth, &mut matched)?;
                }
            }
        }

        // Instances keep their class name
        match value {
            Value::Instance { class, .. } => success(Value::Instance {
                class: class.clone(),
                fields: matched,
            }),
            _ => success(Value::Object(matched)),
        }
    }

    fn validate_pattern_key(
        &self,
        value: &Value,
        pattern: &KeyPattern,
        nested: &Schema,
        depth: usize,
        matched: &mut Vec<(String, Value)>,
    ) -> Result<(), ValidationFailure> {
        let token = format!("[{}]", pattern);
        let regex = match self.patterns.get_or_compile(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                return Err(PartialResult::invalid()
                    .kind(FailureKind::InvalidKeyPattern)
                    .message(format!("Invalid key pattern! {}", err))
                    .path(vec![token])
                    .into_failure());
            }
        };

        let mut found = false;
        for pair in iter_pairs(value) {
            let Some(name) = pair.key() else {
                continue;
            };
            if !regex.is_match(name) {
                continue;
            }
            found = true;
            let output = self
                .validate_node(pair.value(), nested, depth + 1)
                .map_err(|f| f.prefixed(name))?;
            store(matched, name, output);
        }

        if found {
            return Ok(());
        }

        // No key matched: the group is only satisfied if the nested schema
        // accepts an absent value.
        match self.validate_node(&Value::Undefined, nested, depth + 1) {
            Ok(_) => Ok(()),
            Err(inner) if inner.is_fatal() => Err(inner.prefixed(token)),
            Err(_) => Err(PartialResult::invalid()
                .kind(FailureKind::MissingKey)
                .message(format!("No keys matching pattern '{}' found!", pattern))
                .path(vec![token])
                .into_failure()),
        }
    }

    // ========================================================================
    // Alternations
    // ========================================================================

    fn validate_alternatives(
        &self,
        value: &Value,
        schema: &Schema,
        alternatives: &[Schema],
        depth: usize,
    ) -> ValidationResult {
        for alternative in alternatives {
            match self.validate_node(value, alternative, depth + 1) {
                Ok(matched) => return success(matched),
                Err(inner) if inner.is_fatal() => return Err(inner),
                Err(_) => {}
            }
        }

        failure(
            FailureKind::TypeMismatch,
            format!(
                "Invalid property type! Expected '{}', instead got '{}'!",
                format_schema(schema),
                format_shape(value)
            ),
        )
    }

    // ========================================================================
    // Scalars and Arrays
    // ========================================================================

    fn validate_scalar(
        &self,
        value: &Value,
        schema: &Schema,
        scalar: &ScalarSchema,
        depth: usize,
    ) -> ValidationResult {
        if !scalar.tag.matches(value) {
            if let Some(exit) = absent_exit(value, schema) {
                return exit;
            }
            return failure(FailureKind::TypeMismatch, type_mismatch_message(value, scalar.tag));
        }

        check_bounds(value, scalar.tag, &schema.constraints)?;
        check_pattern(value, scalar.tag, &schema.constraints)?;
        check_instance(value, scalar)?;

        let mut working = if scalar.tag == TypeTag::Array {
            self.validate_elements(value, scalar, depth)?
        } else {
            value.clone()
        };

        if let Some(shape) = &scalar.shape {
            working = self.validate_nested_shape(&working, shape, depth)?;
        }

        self.validate_value_rules(working, schema)
    }

    fn validate_elements(&self, value: &Value, scalar: &ScalarSchema, depth: usize) -> ValidationResult {
        let items = scalar.items();
        let length = value.length().unwrap_or(0);

        if scalar.keep_length && length != items.len() {
            return failure(
                FailureKind::ArrayLength,
                format!(
                    "Invalid number of elements in array! Expected '{}' items, instead got '{}'!",
                    items.len(),
                    length
                ),
            );
        }

        let mut matched = Vec::with_capacity(length);
        for pair in iter_pairs(value) {
            let (index, element) = (pair.index(), pair.value());
            let output = if scalar.keep_order {
                match items.get(index) {
                    Some(item) => self.validate_node(element, item, depth + 1),
                    // Positions past the declared items pass through unchecked
                    None => Ok(element.clone()),
                }
            } else {
                self.validate_member(element, items, depth)
            };

            match output {
                Ok(element) => matched.push(element),
                Err(inner) => {
                    return Err(inner
                        .prefixed(format!("[{}]", index))
                        .wrapped(FailureKind::ArrayElement, ELEMENT_PREFIX));
                }
            }
        }

        success(Value::List(matched))
    }

    /// First item schema accepting `element` wins; otherwise the last
    /// attempted schema's failure is reported.
    fn validate_member(&self, element: &Value, items: &[Schema], depth: usize) -> ValidationResult {
        let mut last = None;
        for item in items {
            match self.validate_node(element, item, depth + 1) {
                Ok(matched) => return success(matched),
                Err(inner) if inner.is_fatal() => return Err(inner),
                Err(inner) => last = Some(inner),
            }
        }
        Err(last.unwrap_or_else(|| {
            reject(FailureKind::ArrayElement, "No item schemas accept the element!")
        }))
    }

    fn validate_nested_shape(&self, working: &Value, shape: &ShapeSchema, depth: usize) -> ValidationResult {
        if working.fields().is_none() {
            return failure(
                FailureKind::ObjectShape,
                format!(
                    "{} Expected '{}', instead got '{}'!",
                    SHAPE_PREFIX,
                    format_properties(shape),
                    format_shape(working)
                ),
            );
        }
        self.validate_properties(working, shape, depth + 1)
            .map_err(|inner| inner.wrapped(FailureKind::ObjectShape, SHAPE_PREFIX))
    }

    // ========================================================================
    // Equality, Enumeration and Custom Validators
    // ========================================================================

    fn validate_value_rules(&self, working: Value, schema: &Schema) -> ValidationResult {
        let constraints = &schema.constraints;

        if let Some(expected) = &constraints.equals {
            if !working.strict_eq(expected) {
                return failure(
                    FailureKind::Equality,
                    format!(
                        "Invalid property value! Expected value '{}', instead got '{}'!",
                        format_literal(expected),
                        format_literal(&working)
                    ),
                );
            }
        }

        if let Some(allowed) = &constraints.contains {
            if !allowed.iter().any(|candidate| working.strict_eq(candidate)) {
                return failure(
                    FailureKind::Enumeration,
                    format!(
                        "Invalid property value! Expected one of '{}', instead got '{}'!",
                        self.preview(allowed),
                        format_literal(&working)
                    ),
                );
            }
        }

        if let Some(validator) = &schema.validator {
            return validator.validate(&working, schema);
        }

        success(working)
    }

    fn preview(&self, allowed: &[Value]) -> String {
        let limit = self.config.enum_preview;
        let mut shown: Vec<String> = allowed.iter().take(limit).map(format_literal).collect();
        if allowed.len() > limit {
            shown.push("...".to_string());
        }
        shown.join(", ")
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Early success for an absent optional value or a nullable `null`
fn absent_exit(value: &Value, schema: &Schema) -> Option<ValidationResult> {
    match value {
        Value::Undefined if schema.optional => {
            Some(success(schema.default_value.clone().unwrap_or_default()))
        }
        Value::Null if schema.nullable => Some(success(Value::Null)),
        _ => None,
    }
}

fn type_mismatch_message(value: &Value, tag: TypeTag) -> String {
    match value {
        Value::Undefined => "Non-optional property is 'undefined'!".to_string(),
        Value::Null => "Non-nullable property is 'null'!".to_string(),
        _ => format!(
            "Invalid property type! Expected '{}', instead got '{}'!",
            tag,
            format_shape(value)
        ),
    }
}

/// Insert or replace `key`; absent outputs are left out of the mapping
fn store(matched: &mut Vec<(String, Value)>, key: &str, output: Value) {
    if output.is_undefined() {
        return;
    }
    match matched.iter_mut().find(|(name, _)| name == key) {
        Some((_, slot)) => *slot = output,
        None => matched.push((key.to_string(), output)),
    }
}

fn check_bounds(value: &Value, tag: TypeTag, constraints: &Constraints) -> Result<(), ValidationFailure> {
    if !constraints.has_bounds() {
        return Ok(());
    }

    if tag.is_numeric() {
        let Some(number) = value.as_number() else {
            return Ok(());
        };
        if let Some(min) = constraints.min {
            if number < min {
                return Err(reject(
                    FailureKind::Range,
                    format!(
                        "Invalid number value! Minimal number value is '{}', instead got '{}'!",
                        min,
                        format_literal(value)
                    ),
                ));
            }
        }
        if let Some(max) = constraints.max {
            if number > max {
                return Err(reject(
                    FailureKind::Range,
                    format!(
                        "Invalid number value! Maximal number value is '{}', instead got '{}'!",
                        max,
                        format_literal(value)
                    ),
                ));
            }
        }
        return Ok(());
    }

    let (label, noun) = match tag {
        TypeTag::String => ("string", "String"),
        TypeTag::Array => ("array", "Array"),
        _ => return Ok(()),
    };
    let Some(length) = value.length() else {
        return Ok(());
    };

    let message = if constraints.length.is_some_and(|expected| length != expected) {
        format!(
            "Invalid {} length! Expected '{}', instead got '{}'!",
            label,
            constraints.length.unwrap_or_default(),
            length
        )
    } else if !constraints.empty && length == 0 {
        format!("Invalid {} length! {} cannot be empty!", label, noun)
    } else if constraints.min.is_some_and(|min| (length as f64) < min) {
        format!(
            "Invalid {} length! Minimal {} length is '{}', instead got '{}'!",
            label,
            label,
            constraints.min.unwrap_or_default(),
            length
        )
    } else if constraints.max.is_some_and(|max| (length as f64) > max) {
        format!(
            "Invalid {} length! Maximal {} length is '{}', instead got '{}'!",
            label,
            label,
            constraints.max.unwrap_or_default(),
            length
        )
    } else {
        return Ok(());
    };

    Err(reject(FailureKind::Range, message))
}

fn check_pattern(value: &Value, tag: TypeTag, constraints: &Constraints) -> Result<(), ValidationFailure> {
    if tag != TypeTag::String {
        return Ok(());
    }
    let (Some(pattern), Value::String(text)) = (&constraints.pattern, value) else {
        return Ok(());
    };
    if pattern.is_match(text) {
        return Ok(());
    }
    Err(reject(
        FailureKind::Pattern,
        format!(
            "String '{}' does not match pattern '/{}/'!",
            text,
            pattern.as_str()
        ),
    ))
}

fn check_instance(value: &Value, scalar: &ScalarSchema) -> Result<(), ValidationFailure> {
    let accepted = scalar.accepted_instances();
    if accepted.is_empty() {
        return Ok(());
    }

    let Some(class) = value.class_name() else {
        return Err(reject(
            FailureKind::InstanceMismatch,
            "Invalid property instance! Cannot get instance name of the property!",
        ));
    };

    if accepted.contains(&class) {
        Ok(())
    } else {
        Err(reject(
            FailureKind::InstanceMismatch,
            format!(
                "Invalid property instance! Expected '{}', instead got '{}'!",
                accepted.join(" | "),
                class
            ),
        ))
    }
}
