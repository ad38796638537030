//! Validation error types
//!
//! This module defines the failure half of a validation result and the
//! errors raised while building schema descriptors.

use std::fmt;

use thiserror::Error;

use crate::types::Value;

// ============================================================================
// Validation Result
// ============================================================================

/// Validation result type
///
/// `Ok` carries the matched value (validated, default-substituted or
/// reconstructed); `Err` carries a path-qualified failure.
pub type ValidationResult = Result<Value, ValidationFailure>;

// ============================================================================
// Validation Failure
// ============================================================================

/// A single validation failure
///
/// `path` lists property keys and `[index]` tokens from the outermost frame to
/// the innermost. It is empty at the point of failure and each enclosing frame
/// prepends exactly one token while the failure propagates.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{message}")]
pub struct ValidationFailure {
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable error message
    pub message: String,
    /// Root-to-leaf location of the failure
    pub path: Vec<String>,
}

impl ValidationFailure {
    /// Create a failure with an empty path
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Prepend one path token (a property key or `[index]`)
    pub fn prepend(&mut self, token: impl Into<String>) {
        self.path.insert(0, token.into());
    }

    /// Consuming variant of [`prepend`](Self::prepend)
    pub fn prefixed(mut self, token: impl Into<String>) -> Self {
        self.prepend(token);
        self
    }

    /// Re-label a nested failure with a more specific outer message
    ///
    /// The inner path is preserved. Depth failures pass through unchanged so
    /// that the guard stays visible to the caller.
    pub fn wrapped(self, kind: FailureKind, prefix: &str) -> Self {
        if self.is_fatal() {
            return self;
        }
        Self {
            kind,
            message: format!("{} {}", prefix, self.message),
            path: self.path,
        }
    }

    /// Whether this failure must surface regardless of alternatives
    pub fn is_fatal(&self) -> bool {
        self.kind == FailureKind::DepthExceeded
    }

    /// Path rendered as `a.[0].b`
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

// ============================================================================
// Failure Kind Classification
// ============================================================================

/// Classification of validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    /// Runtime kind does not satisfy the type tag or alternation
    TypeMismatch,
    /// Class name does not match the declared instance(s)
    InstanceMismatch,
    /// Numeric value or string/array length out of bounds
    Range,
    /// String does not match the declared pattern
    Pattern,
    /// Value differs from the declared `equals`
    Equality,
    /// Value is not one of the declared `contains` values
    Enumeration,
    /// Array length differs from the number of item schemas
    ArrayLength,
    /// An array element failed its item schema
    ArrayElement,
    /// Value is not a keyed structure, or a nested shape failed
    ObjectShape,
    /// No key matched a required key pattern
    MissingKey,
    /// Reported by a custom validator
    Custom,
    /// Key pattern could not be compiled
    InvalidKeyPattern,
    /// Recursion exceeded the configured depth
    DepthExceeded,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch => write!(f, "type_mismatch"),
            Self::InstanceMismatch => write!(f, "instance_mismatch"),
            Self::Range => write!(f, "range"),
            Self::Pattern => write!(f, "pattern"),
            Self::Equality => write!(f, "equality"),
            Self::Enumeration => write!(f, "enumeration"),
            Self::ArrayLength => write!(f, "array_length"),
            Self::ArrayElement => write!(f, "array_element"),
            Self::ObjectShape => write!(f, "object_shape"),
            Self::MissingKey => write!(f, "missing_key"),
            Self::Custom => write!(f, "custom"),
            Self::InvalidKeyPattern => write!(f, "invalid_key_pattern"),
            Self::DepthExceeded => write!(f, "depth_exceeded"),
        }
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// Errors raised while building or loading schema descriptors
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unknown type tag '{0}'")]
    UnknownType(String),

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid descriptor field '{field}': expected {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("Schema descriptor must be an object")]
    NotAnObject,
}
