//! Validation constraints shared by every schema node
//!
//! Range and length rules only apply to type-tagged nodes whose tag gives them
//! meaning (numbers for `min`/`max` on the value, strings and arrays for the
//! length rules). Equality and enumeration apply to any non-shape node.

use regex::Regex;

use crate::types::Value;

/// Constraint block of a schema node
#[derive(Debug, Clone)]
pub struct Constraints {
    /// Whether empty strings/arrays are acceptable
    pub empty: bool,
    /// Inclusive lower bound on a number, or on a string/array length
    pub min: Option<f64>,
    /// Inclusive upper bound on a number, or on a string/array length
    pub max: Option<f64>,
    /// Exact string/array length, checked before `min`/`max`
    pub length: Option<usize>,
    /// Pattern a string value must satisfy
    pub pattern: Option<Regex>,
    /// Required exact value
    pub equals: Option<Value>,
    /// Acceptable literal values
    pub contains: Option<Vec<Value>>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            empty: true,
            min: None,
            max: None,
            length: None,
            pattern: None,
            equals: None,
            contains: None,
        }
    }
}

impl Constraints {
    /// Whether any length or range rule is declared
    pub fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some() || self.length.is_some() || !self.empty
    }
}
