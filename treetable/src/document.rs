//! Discovery and initialization of every tree table in a document.

use std::collections::HashMap;

use log::{debug, warn};

use crate::config::{self, MARKER_CLASS, TableConfig};
use crate::error::TreeError;
use crate::expansion;
use crate::glyphs::Glyphs;
use crate::row::Row;
use crate::table::TreeTable;

/// A table element: classes, attributes and its rows.
#[derive(Debug, Clone, Default)]
pub struct TableElement {
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub rows: Vec<Row>,
}

impl TableElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a row.
    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether the element is marked as a tree table.
    pub fn is_tree_table(&self) -> bool {
        self.has_class(MARKER_CLASS)
    }

    /// Configuration read from the element's attributes.
    pub fn config(&self) -> Result<TableConfig, TreeError> {
        TableConfig::from_attributes(&self.attributes)
    }
}

impl Row {
    /// Create a row from its element attributes and cell texts.
    pub fn from_attributes<I, S>(attributes: &HashMap<String, String>, cells: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Row::new(config::parse_level(attributes)?).cells(cells))
    }
}

/// Initialize one table element in place, configured by its attributes.
pub fn initialize_table(table: &mut TableElement, glyphs: &Glyphs) -> Result<(), TreeError> {
    let config = table.config()?;
    expansion::initialize(&mut table.rows, &config, glyphs)
}

/// An ordered collection of table elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub tables: Vec<TableElement>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table.
    pub fn table(mut self, table: TableElement) -> Self {
        self.tables.push(table);
        self
    }

    /// Indices of the tables carrying the marker class, in document order.
    pub fn tree_tables(&self) -> Vec<usize> {
        self.tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.is_tree_table())
            .map(|(index, _)| index)
            .collect()
    }

    /// Initialize every marked table independently, in document order.
    ///
    /// The first failure is returned immediately, tagged with the table
    /// index. Tables before it stay initialized, later ones are untouched.
    pub fn initialize_tree_tables(&mut self, glyphs: &Glyphs) -> Result<usize, TreeError> {
        let indices = self.tree_tables();
        for &index in &indices {
            initialize_table(&mut self.tables[index], glyphs).map_err(|source| {
                warn!("failed to initialize tree table {index}: {source}");
                TreeError::Table {
                    index,
                    source: Box::new(source),
                }
            })?;
        }
        debug!("initialized {} tree tables", indices.len());
        Ok(indices.len())
    }

    /// Initialize every marked table and hand each one out as a [`TreeTable`].
    ///
    /// Unmarked tables are dropped. Fails like [`Self::initialize_tree_tables`].
    pub fn into_tree_tables(self, glyphs: &Glyphs) -> Result<Vec<TreeTable<Vec<Row>>>, TreeError> {
        self.tables
            .into_iter()
            .enumerate()
            .filter(|(_, table)| table.is_tree_table())
            .map(|(index, table)| {
                table
                    .config()
                    .and_then(|config| TreeTable::initialize(table.rows, config, glyphs.clone()))
                    .map_err(|source| {
                        warn!("failed to initialize tree table {index}: {source}");
                        TreeError::Table {
                            index,
                            source: Box::new(source),
                        }
                    })
            })
            .collect()
    }
}
