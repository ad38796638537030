//! Result builder
//!
//! Every exit point of the engine goes through [`build_result`], which turns a
//! partially filled result into one of the two canonical shapes.

use crate::errors::{FailureKind, ValidationFailure, ValidationResult};
use crate::types::Value;

/// Partially specified validation outcome
#[derive(Debug, Clone, Default)]
pub struct PartialResult {
    /// Whether validation succeeded
    pub valid: bool,
    /// Matched value (success only)
    pub matched: Option<Value>,
    /// Failure classification (failure only)
    pub kind: Option<FailureKind>,
    /// Failure message (failure only)
    pub message: Option<String>,
    /// Failure path (failure only)
    pub path: Option<Vec<String>>,
}

impl PartialResult {
    /// Start a successful result
    pub fn valid() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    /// Start a failed result
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Set the matched value
    pub fn matched(mut self, value: Value) -> Self {
        self.matched = Some(value);
        self
    }

    /// Set the failure classification
    pub fn kind(mut self, kind: FailureKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the failure message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the failure path
    pub fn path(mut self, path: Vec<String>) -> Self {
        self.path = Some(path);
        self
    }

    /// Normalize into a [`ValidationResult`]
    pub fn build(self) -> ValidationResult {
        build_result(self)
    }

    /// Normalize the failure fields, ignoring `valid` and `matched`
    pub(crate) fn into_failure(self) -> ValidationFailure {
        ValidationFailure {
            kind: self.kind.unwrap_or(FailureKind::Custom),
            message: self.message.unwrap_or_default(),
            path: self.path.unwrap_or_default(),
        }
    }
}

/// Normalize a partial result into the canonical success or failure shape
///
/// A success keeps its matched value (`Undefined` when none was given). A
/// failure always carries a message and a path, defaulting to `""` and `[]`.
pub fn build_result(partial: PartialResult) -> ValidationResult {
    if partial.valid {
        Ok(partial.matched.unwrap_or_default())
    } else {
        Err(partial.into_failure())
    }
}

/// Successful result matching `value`
pub(crate) fn success(value: Value) -> ValidationResult {
    PartialResult::valid().matched(value).build()
}

/// Failed result with an empty path
pub(crate) fn failure(kind: FailureKind, message: impl Into<String>) -> ValidationResult {
    PartialResult::invalid().kind(kind).message(message).build()
}

/// Failure value for checks that do not produce a matched value
pub(crate) fn reject(kind: FailureKind, message: impl Into<String>) -> ValidationFailure {
    PartialResult::invalid().kind(kind).message(message).into_failure()
}
