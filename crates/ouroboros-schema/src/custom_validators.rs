//! Custom validator support
//!
//! A schema node may carry a custom validator. It runs only after every
//! built-in check on that node has passed, and whatever it returns becomes the
//! node's result verbatim, so it can both reject values the built-in checks
//! accepted and replace the matched value.
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema::{custom_failure, Schema, TypeTag, Value, validate};
//!
//! let even = Schema::of(TypeTag::Integer).validator(|value: &Value, _schema: &Schema| {
//!     match value {
//!         Value::Int(n) if n % 2 == 0 => Ok(value.clone()),
//!         _ => custom_failure("Expected an even number!"),
//!     }
//! });
//!
//! assert!(validate(&Value::Int(4), &even).is_ok());
//! assert!(validate(&Value::Int(5), &even).is_err());
//! ```

use std::sync::Arc;

use crate::errors::{FailureKind, ValidationResult};
use crate::result::PartialResult;
use crate::schema::Schema;
use crate::types::Value;

// ============================================================================
// Schema Validator Trait
// ============================================================================

/// Escape-hatch validator attached to a schema node
pub trait SchemaValidator: Send + Sync {
    /// Decide the outcome for a value that passed the built-in checks
    ///
    /// # Arguments
    /// * `value` - The value as normalized by the built-in checks
    /// * `schema` - The schema node carrying this validator
    fn validate(&self, value: &Value, schema: &Schema) -> ValidationResult;
}

/// Type alias for a shared validator
pub type BoxedSchemaValidator = Arc<dyn SchemaValidator>;

// ============================================================================
// Function-based Validators (for ergonomic API)
// ============================================================================

/// Create a schema validator from a function
pub struct FnSchemaValidator<F>
where
    F: Fn(&Value, &Schema) -> ValidationResult + Send + Sync,
{
    validate_fn: F,
}

impl<F> FnSchemaValidator<F>
where
    F: Fn(&Value, &Schema) -> ValidationResult + Send + Sync,
{
    /// Create a new function-based validator
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> SchemaValidator for FnSchemaValidator<F>
where
    F: Fn(&Value, &Schema) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &Value, schema: &Schema) -> ValidationResult {
        (self.validate_fn)(value, schema)
    }
}

// ============================================================================
// Helper Functions for Creating Results
// ============================================================================

/// Failure reported by a custom validator
pub fn custom_failure(message: impl Into<String>) -> ValidationResult {
    PartialResult::invalid()
        .kind(FailureKind::Custom)
        .message(message)
        .build()
}
