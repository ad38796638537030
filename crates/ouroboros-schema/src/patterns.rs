//! Regex-key markers and the compiled-pattern cache
//!
//! A property key written as `/pattern/flags` matches every key of the
//! validated value that satisfies the pattern. Markers are recognized
//! lexically; compilation happens on first use and is memoized in a
//! [`PatternCache`] owned by the validator, outside the schema data.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use regex::Regex;
use tracing::debug;

use crate::errors::SchemaError;

/// Flags accepted after the closing slash
const MARKER_FLAGS: &str = "dgimsuyv";

// ============================================================================
// Key Pattern
// ============================================================================

/// A lexically recognized `/pattern/flags` key marker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    source: String,
    body: String,
    flags: String,
}

impl KeyPattern {
    /// Recognize a key marker; `None` for literal keys
    ///
    /// ```
    /// use ouroboros_schema::patterns::KeyPattern;
    ///
    /// let pattern = KeyPattern::parse("/^x_/i").unwrap();
    /// assert_eq!(pattern.body(), "^x_");
    /// assert_eq!(pattern.flags(), "i");
    /// assert!(KeyPattern::parse("plain").is_none());
    /// ```
    pub fn parse(key: &str) -> Option<Self> {
        let rest = key.strip_prefix('/')?;
        let close = rest.rfind('/')?;
        let (body, flags) = (&rest[..close], &rest[close + 1..]);
        if body.is_empty() || !flags.chars().all(|c| MARKER_FLAGS.contains(c)) {
            return None;
        }
        Some(Self {
            source: key.to_string(),
            body: body.to_string(),
            flags: flags.to_string(),
        })
    }

    /// The marker as written, e.g. `/^x_/i`
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pattern text between the slashes
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Flags after the closing slash
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Compile the marker into a regex
    ///
    /// `i`, `m` and `s` become inline flags; the remaining marker flags have
    /// no effect on key matching.
    pub fn compile(&self) -> Result<Regex, SchemaError> {
        let inline: String = self
            .flags
            .chars()
            .filter(|c| matches!(c, 'i' | 'm' | 's'))
            .collect();
        let expr = if inline.is_empty() {
            self.body.clone()
        } else {
            format!("(?{}){}", inline, self.body)
        };
        Regex::new(&expr).map_err(|source| SchemaError::InvalidRegex {
            pattern: self.source.clone(),
            source,
        })
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ============================================================================
// Pattern Cache
// ============================================================================

/// Memo of compiled key patterns, keyed by marker text
///
/// Compiling the same marker twice yields an equivalent regex, so a race on
/// first use only costs a duplicate compilation. Insertion happens under the
/// write lock and readers never observe a partial entry.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: RwLock<HashMap<String, Arc<Regex>>>,
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached regex for `pattern`, compiling it on first use
    pub fn get_or_compile(&self, pattern: &KeyPattern) -> Result<Arc<Regex>, SchemaError> {
        if let Some(regex) = self.compiled.read().get(pattern.source()) {
            return Ok(Arc::clone(regex));
        }

        let regex = Arc::new(pattern.compile()?);
        debug!(pattern = %pattern, "compiled key pattern");

        let mut compiled = self.compiled.write();
        let entry = compiled
            .entry(pattern.source().to_string())
            .or_insert(regex);
        Ok(Arc::clone(entry))
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    /// Whether nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }

    /// Drop every cached pattern
    pub fn clear(&self) {
        self.compiled.write().clear();
    }
}
