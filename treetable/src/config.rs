//! Per-table configuration read from element attributes.

use std::collections::HashMap;

use crate::error::TreeError;

/// Class marking a table element as a tree table.
pub const MARKER_CLASS: &str = "treetable";

/// Attribute holding the zero-based tree column index.
pub const TREE_COLUMN_ATTR: &str = "data-tree-column";

/// Attribute set to `"true"` to start with every row expanded.
pub const TREE_EXPANDED_ATTR: &str = "data-tree-expanded";

/// Attribute holding a row's nesting level.
pub const TREE_LEVEL_ATTR: &str = "data-tree-level";

/// How a tree table is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableConfig {
    /// Column receiving the expand controls.
    pub tree_column: usize,
    /// Start with every row expanded instead of collapsed.
    pub initially_expanded: bool,
}

impl TableConfig {
    pub fn new(tree_column: usize, initially_expanded: bool) -> Self {
        Self {
            tree_column,
            initially_expanded,
        }
    }

    /// Read the configuration from a table element's attributes.
    ///
    /// A missing or negative column falls back to 0. A column that is not a
    /// plain integer (`"first"`, `"2px"`) is rejected instead of being read
    /// leniently as the browser's `parseInt` would. Only the exact value
    /// `"true"` enables initial expansion.
    pub fn from_attributes(attributes: &HashMap<String, String>) -> Result<Self, TreeError> {
        let tree_column = match attributes.get(TREE_COLUMN_ATTR) {
            None => 0,
            Some(raw) => {
                let value: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| TreeError::invalid_attribute(TREE_COLUMN_ATTR, Some(raw)))?;
                usize::try_from(value).unwrap_or(0)
            }
        };
        let initially_expanded = attributes
            .get(TREE_EXPANDED_ATTR)
            .is_some_and(|value| value == "true");

        Ok(Self {
            tree_column,
            initially_expanded,
        })
    }
}

/// Parse a row's level attribute.
pub fn parse_level(attributes: &HashMap<String, String>) -> Result<u16, TreeError> {
    let raw = attributes.get(TREE_LEVEL_ATTR);
    raw.and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| TreeError::invalid_attribute(TREE_LEVEL_ATTR, raw.map(String::as_str)))
}
