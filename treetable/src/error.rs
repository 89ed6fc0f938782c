//! Error types for tree-table operations.

/// Errors raised while initializing or toggling a tree table.
///
/// Every variant is a programmer or data error: the input breaks an invariant
/// and the current call is aborted without partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A row's level jumps more than one step deeper than its predecessor.
    #[error("rows are not in depth-first order: row {row} has level {level}, at most {max} allowed")]
    MalformedLevels {
        /// Index of the offending row.
        row: usize,
        /// Declared level of the offending row.
        level: u16,
        /// Deepest level structurally valid at that position.
        max: u16,
    },

    /// Not a single row exposes a cell at the configured tree column.
    #[error("found not a single tree cell at column index {column}")]
    MissingTreeColumn {
        /// Configured tree column (zero based).
        column: usize,
    },

    /// Expand or collapse indicator is empty.
    #[error("expand/collapse glyphs are not configured")]
    MissingGlyphs,

    /// A row index does not address a row of the list.
    #[error("row {row} out of range (table has {len} rows)")]
    RowOutOfRange {
        /// Requested row index.
        row: usize,
        /// Number of rows in the list.
        len: usize,
    },

    /// A configuration attribute is missing or cannot be parsed.
    #[error("invalid attribute {name}: {value:?}")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Raw attribute value, if present.
        value: Option<String>,
    },

    /// Initializing one table of a document failed.
    #[error("tree table {index}: {source}")]
    Table {
        /// Index of the table within the document.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<TreeError>,
    },
}

impl TreeError {
    /// Creates an invalid attribute error.
    pub fn invalid_attribute(name: impl Into<String>, value: Option<&str>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }

    /// Returns `true` if the error signals a broken level sequence.
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::MalformedLevels { .. } => true,
            Self::Table { source, .. } => source.is_malformed(),
            _ => false,
        }
    }
}
