//! Configuration options for validation behavior

/// Default recursion limit
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default number of allowed values listed in enumeration failures
pub const DEFAULT_ENUM_PREVIEW: usize = 5;

// ============================================================================
// Validator Config
// ============================================================================

/// Configuration options for a [`Validator`](crate::Validator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Maximum nesting depth before validation fails with a depth error
    pub max_depth: usize,

    /// Allowed values listed before the ellipsis in enumeration failures
    pub enum_preview: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            enum_preview: DEFAULT_ENUM_PREVIEW,
        }
    }
}

impl ValidatorConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion limit
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set how many allowed values an enumeration failure lists
    pub fn enum_preview(mut self, count: usize) -> Self {
        self.enum_preview = count;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
