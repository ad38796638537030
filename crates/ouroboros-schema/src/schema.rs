//! Schema descriptor model
//!
//! A [`Schema`] is a caller-built tree. How a node is validated is fixed by
//! its [`SchemaKind`] when it is constructed:
//!
//! - [`SchemaKind::Shape`]: a keyed structure described property by property
//! - [`SchemaKind::Alternation`]: valid against at least one alternative
//! - [`SchemaKind::Scalar`]: a type tag plus tag-specific rules
//!
//! Schemas must be acyclic. The validator enforces a depth limit rather than
//! overflowing the stack on pathological nesting.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constraints::Constraints;
use crate::custom_validators::{BoxedSchemaValidator, FnSchemaValidator, SchemaValidator};
use crate::errors::ValidationResult;
use crate::patterns::KeyPattern;
use crate::types::{TypeTag, Value};

/// Item list used when an array schema declares none
static DEFAULT_ITEMS: Lazy<Vec<Schema>> = Lazy::new(|| vec![Schema::any()]);

// ============================================================================
// Property Keys
// ============================================================================

/// Key of an object-shape property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    /// Exact key
    Literal(String),
    /// Every key matching a `/pattern/flags` marker
    Pattern(KeyPattern),
}

impl PropertyKey {
    /// Classify a key: markers become patterns, everything else is literal
    pub fn parse(key: impl Into<String>) -> Self {
        let key = key.into();
        match KeyPattern::parse(&key) {
            Some(pattern) => Self::Pattern(pattern),
            None => Self::Literal(key),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(key) => f.write_str(key),
            Self::Pattern(pattern) => write!(f, "[{}]", pattern),
        }
    }
}

// ============================================================================
// Schema Kinds
// ============================================================================

/// Property-by-property description of a keyed structure
#[derive(Debug, Clone, Default)]
pub struct ShapeSchema {
    /// Properties in declaration order
    pub properties: Vec<(PropertyKey, Schema)>,
}

impl ShapeSchema {
    /// Create an empty shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property; `/pattern/flags` keys become key patterns
    pub fn property(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.properties.push((PropertyKey::parse(key), schema));
        self
    }
}

/// Type-tagged node
#[derive(Debug, Clone, Default)]
pub struct ScalarSchema {
    /// Required runtime kind
    pub tag: TypeTag,
    /// Required class name
    pub instance: Option<String>,
    /// Acceptable class names; supersedes `instance`
    pub instances: Option<Vec<String>>,
    /// Element schemas (array tag); `None` means a single `any` schema
    pub items: Option<Vec<Schema>>,
    /// Validate element `i` against `items[i]`
    pub keep_order: bool,
    /// Require exactly `items.len()` elements
    pub keep_length: bool,
    /// Nested property shape checked after the tag-specific rules
    pub shape: Option<ShapeSchema>,
}

impl ScalarSchema {
    /// Create a scalar node for `tag`
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    /// Element schemas in effect
    pub fn items(&self) -> &[Schema] {
        self.items.as_deref().unwrap_or(DEFAULT_ITEMS.as_slice())
    }

    /// Class names in effect (`instances` over `instance`)
    pub fn accepted_instances(&self) -> Vec<&str> {
        match (&self.instances, &self.instance) {
            (Some(names), _) => names.iter().map(String::as_str).collect(),
            (None, Some(name)) => vec![name.as_str()],
            (None, None) => Vec::new(),
        }
    }
}

/// How a schema node is validated
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// Keyed structure, property by property
    Shape(ShapeSchema),
    /// At least one alternative must accept the value
    Alternation(Vec<Schema>),
    /// Type tag and tag-specific rules
    Scalar(ScalarSchema),
}

// ============================================================================
// Schema
// ============================================================================

/// Schema descriptor node
#[derive(Clone)]
pub struct Schema {
    /// Validation mode
    pub kind: SchemaKind,
    /// Accept `null`
    pub nullable: bool,
    /// Accept an absent value
    pub optional: bool,
    /// Matched value substituted for an absent optional value
    pub default_value: Option<Value>,
    /// Range, length, pattern, equality and enumeration rules
    pub constraints: Constraints,
    /// Custom validator deciding the final outcome
    pub validator: Option<BoxedSchemaValidator>,
}

impl Schema {
    /// Create a schema of the given kind with default flags
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            optional: false,
            default_value: None,
            constraints: Constraints::default(),
            validator: None,
        }
    }

    /// Any defined, non-null value
    pub fn any() -> Self {
        Self::of(TypeTag::Any)
    }

    /// Type-tagged schema
    pub fn of(tag: TypeTag) -> Self {
        Self::new(SchemaKind::Scalar(ScalarSchema::new(tag)))
    }

    /// String schema
    pub fn string() -> Self {
        Self::of(TypeTag::String)
    }

    /// Number schema (integers and floats)
    pub fn number() -> Self {
        Self::of(TypeTag::Number)
    }

    /// Whole-number schema
    pub fn integer() -> Self {
        Self::of(TypeTag::Integer)
    }

    /// Boolean schema
    pub fn boolean() -> Self {
        Self::of(TypeTag::Boolean)
    }

    /// Array schema with the given element schemas
    pub fn array(items: Vec<Schema>) -> Self {
        Self::of(TypeTag::Array).items(items)
    }

    /// Object-shape schema with no properties yet
    pub fn shape() -> Self {
        Self::new(SchemaKind::Shape(ShapeSchema::new()))
    }

    /// Alternation over `alternatives`
    pub fn one_of(alternatives: Vec<Schema>) -> Self {
        Self::new(SchemaKind::Alternation(alternatives))
    }

    /// Accept `null`
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Accept an absent value
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Make the value optional and substitute `value` when absent
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self.optional = true;
        self
    }

    /// Reject empty strings/arrays
    pub fn non_empty(mut self) -> Self {
        self.constraints.empty = false;
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Exact string/array length
    pub fn length(mut self, length: usize) -> Self {
        self.constraints.length = Some(length);
        self
    }

    /// Pattern a string value must satisfy
    pub fn matches(mut self, pattern: Regex) -> Self {
        self.constraints.pattern = Some(pattern);
        self
    }

    /// Required exact value
    pub fn equals(mut self, value: impl Into<Value>) -> Self {
        self.constraints.equals = Some(value.into());
        self
    }

    /// Acceptable literal values
    pub fn contains(mut self, values: Vec<Value>) -> Self {
        self.constraints.contains = Some(values);
        self
    }

    /// Attach a custom validator built from a function
    pub fn validator<F>(self, validate_fn: F) -> Self
    where
        F: Fn(&Value, &Schema) -> ValidationResult + Send + Sync + 'static,
    {
        self.with_validator(FnSchemaValidator::new(validate_fn))
    }

    /// Attach a custom validator
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Add a property
    ///
    /// On a type-tagged node this declares a nested shape checked after the
    /// tag rules. Alternations ignore properties.
    pub fn property(mut self, key: impl Into<String>, schema: Schema) -> Self {
        let entry = (PropertyKey::parse(key), schema);
        match &mut self.kind {
            SchemaKind::Shape(shape) => shape.properties.push(entry),
            SchemaKind::Scalar(scalar) => scalar
                .shape
                .get_or_insert_with(ShapeSchema::new)
                .properties
                .push(entry),
            SchemaKind::Alternation(_) => {}
        }
        self
    }

    /// Required class name (type-tagged nodes only)
    pub fn instance(mut self, class: impl Into<String>) -> Self {
        if let Some(scalar) = self.scalar_mut() {
            scalar.instance = Some(class.into());
        }
        self
    }

    /// Acceptable class names (type-tagged nodes only)
    pub fn instances<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(scalar) = self.scalar_mut() {
            scalar.instances = Some(classes.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Element schemas (type-tagged nodes only)
    pub fn items(mut self, items: Vec<Schema>) -> Self {
        if let Some(scalar) = self.scalar_mut() {
            scalar.items = Some(items);
        }
        self
    }

    /// Validate elements positionally (type-tagged nodes only)
    pub fn keep_order(mut self) -> Self {
        if let Some(scalar) = self.scalar_mut() {
            scalar.keep_order = true;
        }
        self
    }

    /// Require exactly one element per item schema (type-tagged nodes only)
    pub fn keep_length(mut self) -> Self {
        if let Some(scalar) = self.scalar_mut() {
            scalar.keep_length = true;
        }
        self
    }

    fn scalar_mut(&mut self) -> Option<&mut ScalarSchema> {
        match &mut self.kind {
            SchemaKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("optional", &self.optional)
            .field("default_value", &self.default_value)
            .field("constraints", &self.constraints)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
