//! Expand/collapse indicator symbols.

use crate::error::TreeError;
use crate::row::RowState;

/// Default indicator for a collapsed row (triangle pointing right).
pub const DEFAULT_EXPAND: &str = "\u{25B8}";

/// Default indicator for an expanded row (triangle pointing down).
pub const DEFAULT_COLLAPSE: &str = "\u{25BE}";

/// Indicator pair shown in a row's expand control.
///
/// `expand` is displayed on collapsed rows (clicking expands them),
/// `collapse` on expanded rows. Each tree table keeps its own pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub expand: String,
    pub collapse: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            expand: DEFAULT_EXPAND.to_string(),
            collapse: DEFAULT_COLLAPSE.to_string(),
        }
    }
}

impl Glyphs {
    /// Create a pair from explicit symbols.
    pub fn new(expand: impl Into<String>, collapse: impl Into<String>) -> Self {
        Self {
            expand: expand.into(),
            collapse: collapse.into(),
        }
    }

    /// Replace the expand symbol. Empty input keeps the current one.
    pub fn with_expand(mut self, symbol: &str) -> Self {
        if !symbol.is_empty() {
            self.expand = symbol.to_string();
        }
        self
    }

    /// Replace the collapse symbol. Empty input keeps the current one.
    pub fn with_collapse(mut self, symbol: &str) -> Self {
        if !symbol.is_empty() {
            self.collapse = symbol.to_string();
        }
        self
    }

    /// Fails if either symbol is empty.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.expand.is_empty() || self.collapse.is_empty() {
            return Err(TreeError::MissingGlyphs);
        }
        Ok(())
    }

    /// Symbol displayed for a row in `state`.
    pub fn for_state(&self, state: RowState) -> &str {
        match state {
            RowState::Expanded => &self.collapse,
            RowState::Collapsed => &self.expand,
            RowState::Leaf => "",
        }
    }
}
