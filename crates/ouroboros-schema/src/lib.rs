//! Ouroboros Schema
//!
//! Structural schema validation for dynamically shaped runtime values.
//!
//! A caller builds a [`Schema`] tree describing the expected shape of a value:
//! type tags, optional/nullable flags, numeric ranges, length limits, string
//! patterns, literal equality, enumerations, class-instance checks, arrays
//! (positional or membership), alternations and object shapes whose keys may
//! be `/regex/` patterns. [`validate`] checks a [`Value`] against it and
//! returns either the matched value or a [`ValidationFailure`] carrying a
//! message and the path to the offending location.
//!
//! # Features
//!
//! - **Default**: Core validation
//! - **serde**: Schema descriptors and values from `serde_json`, serializable failures
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema::{FailureKind, Schema, Value, validate};
//!
//! let schema = Schema::shape()
//!     .property("id", Schema::integer().min(1.0))
//!     .property("tags", Schema::array(vec![Schema::string()]))
//!     .property("/^x_/", Schema::number().optional());
//!
//! let value = Value::object([
//!     ("id", Value::Int(7)),
//!     ("tags", Value::List(vec![Value::from("a"), Value::Int(2)])),
//! ]);
//!
//! let failure = validate(&value, &schema).unwrap_err();
//! assert_eq!(failure.kind, FailureKind::ArrayElement);
//! assert_eq!(failure.path, vec!["tags", "[1]"]);
//! ```

// Public modules
pub mod config;
pub mod constraints;
pub mod custom_validators;
pub mod errors;
pub mod format;
pub mod patterns;
pub mod result;
pub mod schema;
pub mod types;
pub mod util;
pub mod validators;

// JSON descriptors (feature-gated)
#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used types
pub use config::ValidatorConfig;
pub use constraints::Constraints;
pub use custom_validators::{
    custom_failure, BoxedSchemaValidator, FnSchemaValidator, SchemaValidator,
};
pub use errors::{FailureKind, SchemaError, ValidationFailure, ValidationResult};
pub use format::{format_literal, format_properties, format_schema, format_shape};
pub use result::{build_result, PartialResult};
pub use schema::{PropertyKey, ScalarSchema, Schema, SchemaKind, ShapeSchema};
pub use types::{TypeTag, Value};
pub use util::{iter_pairs, uniquify, uniquify_value};
pub use validators::{validate, Validator};

#[cfg(feature = "serde")]
pub use json::schema_from_json;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
