//! Tree table widget instance.

use log::debug;

use crate::config::TableConfig;
use crate::error::TreeError;
use crate::expansion;
use crate::glyphs::Glyphs;
use crate::level::LevelIndex;
use crate::row::{RowState, TreeRows};

/// A row list rendered as a collapsible tree.
///
/// Owns the rows together with the configuration and glyphs they were
/// initialized with, so several tables can coexist without sharing state.
///
/// # Example
///
/// ```
/// use treetable::{Glyphs, Row, RowState, TableConfig, TreeTable};
///
/// let rows = vec![
///     Row::new(0).cell("src"),
///     Row::new(1).cell("main.rs"),
///     Row::new(0).cell("Cargo.toml"),
/// ];
/// let mut table = TreeTable::initialize(rows, TableConfig::default(), Glyphs::default())?;
/// assert_eq!(table.visible_rows(), vec![0, 2]);
///
/// table.activate(0)?;
/// assert_eq!(table.state(0)?, RowState::Expanded);
/// assert_eq!(table.visible_rows(), vec![0, 1, 2]);
/// # Ok::<(), treetable::TreeError>(())
/// ```
#[derive(Debug)]
pub struct TreeTable<R: TreeRows> {
    rows: R,
    config: TableConfig,
    glyphs: Glyphs,
    dirty: bool,
}

impl<R: TreeRows> TreeTable<R> {
    /// Attach controls to `rows` and drive them to the configured state.
    pub fn initialize(mut rows: R, config: TableConfig, glyphs: Glyphs) -> Result<Self, TreeError> {
        expansion::initialize(&mut rows, &config, &glyphs)?;
        Ok(Self {
            rows,
            config,
            glyphs,
            dirty: true,
        })
    }

    /// The underlying rows.
    pub fn rows(&self) -> &R {
        &self.rows
    }

    /// Give the rows back.
    pub fn into_rows(self) -> R {
        self.rows
    }

    /// Configuration the table was initialized with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Indicator symbols used by this table.
    pub fn glyphs(&self) -> &Glyphs {
        &self.glyphs
    }

    /// Structural queries over the rows.
    pub fn index(&self) -> LevelIndex<'_, R> {
        LevelIndex::new(&self.rows)
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Expand (`currently_expanded == false`) or collapse a row.
    pub fn toggle(&mut self, row: usize, currently_expanded: bool) -> Result<(), TreeError> {
        expansion::toggle(&mut self.rows, row, currently_expanded, &self.glyphs)?;
        self.dirty = true;
        Ok(())
    }

    /// Toggle a row according to its current marker. Leaves are ignored.
    pub fn activate(&mut self, row: usize) -> Result<(), TreeError> {
        expansion::activate(&mut self.rows, row, &self.glyphs)?;
        self.dirty = true;
        Ok(())
    }

    /// Current state marker of a row.
    pub fn state(&self, row: usize) -> Result<RowState, TreeError> {
        self.check(row)?;
        Ok(self.rows.state(row))
    }

    /// Whether a row is currently shown.
    pub fn is_visible(&self, row: usize) -> Result<bool, TreeError> {
        self.check(row)?;
        Ok(!self.rows.is_hidden(row))
    }

    /// Indices of the shown rows, in list order.
    pub fn visible_rows(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&index| !self.rows.is_hidden(index))
            .collect()
    }

    /// Expand every row that has descendants, top-down.
    pub fn expand_all(&mut self) -> Result<(), TreeError> {
        self.set_all(false)
    }

    /// Collapse every row that has descendants, top-down.
    pub fn collapse_all(&mut self) -> Result<(), TreeError> {
        self.set_all(true)
    }

    fn set_all(&mut self, currently_expanded: bool) -> Result<(), TreeError> {
        let column = self.config.tree_column;
        for index in 0..self.rows.len() {
            if self.rows.has_cell(index, column) && self.rows.state(index) != RowState::Leaf {
                expansion::toggle(&mut self.rows, index, currently_expanded, &self.glyphs)?;
            }
        }
        debug!(
            "{} all rows",
            if currently_expanded { "collapsed" } else { "expanded" }
        );
        self.dirty = true;
        Ok(())
    }

    fn check(&self, row: usize) -> Result<(), TreeError> {
        let len = self.rows.len();
        if row < len {
            Ok(())
        } else {
            Err(TreeError::RowOutOfRange { row, len })
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Whether the table changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
