//! Iteration and de-duplication helpers

use crate::types::Value;

// ============================================================================
// Iteration Pairs
// ============================================================================

/// One entry produced by [`iter_pairs`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pair<'a> {
    /// Element of a sequence, or a scalar at index 0
    Indexed {
        /// Position
        index: usize,
        /// Element
        value: &'a Value,
    },
    /// Entry of a mapping
    Keyed {
        /// Position in the mapping's natural key order
        index: usize,
        /// Key
        key: &'a str,
        /// Entry value
        value: &'a Value,
    },
}

impl<'a> Pair<'a> {
    /// Position of the entry
    pub fn index(&self) -> usize {
        match self {
            Self::Indexed { index, .. } | Self::Keyed { index, .. } => *index,
        }
    }

    /// Key of a mapping entry
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Self::Keyed { key, .. } => Some(*key),
            Self::Indexed { .. } => None,
        }
    }

    /// Entry value
    pub fn value(&self) -> &'a Value {
        match self {
            Self::Indexed { value, .. } | Self::Keyed { value, .. } => *value,
        }
    }
}

/// Ordered `(index[, key], value)` entries of a value
///
/// Lists yield their elements, keyed structures their fields in insertion
/// order, `undefined`/`null` nothing, and any other value a single entry at
/// index 0.
pub fn iter_pairs(value: &Value) -> Vec<Pair<'_>> {
    match value {
        Value::Undefined | Value::Null => Vec::new(),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| Pair::Indexed { index, value })
            .collect(),
        Value::Object(fields) | Value::Instance { fields, .. } => fields
            .iter()
            .enumerate()
            .map(|(index, (key, value))| Pair::Keyed {
                index,
                key: key.as_str(),
                value,
            })
            .collect(),
        other => vec![Pair::Indexed {
            index: 0,
            value: other,
        }],
    }
}

// ============================================================================
// Uniquify
// ============================================================================

/// Remove duplicates, keeping the first occurrence of each element
pub fn uniquify<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// [`uniquify`] lifted to runtime values
///
/// Lists lose duplicate elements, object literals are shallow-copied and any
/// other value is returned unchanged.
pub fn uniquify_value(value: &Value) -> Value {
    match value {
        Value::List(items) => Value::List(uniquify(items)),
        other => other.clone(),
    }
}
