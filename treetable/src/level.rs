//! Level index: structural queries over a flat, level-annotated row list.
//!
//! No parent/child pointers are stored. Structure is recovered on demand by
//! comparing levels: a row's sub-tree is the contiguous run of following rows
//! deeper than it, its parent is the nearest preceding shallower row.

use std::ops::Range;

use log::warn;

use crate::error::TreeError;
use crate::row::{RowState, TreeRows};

/// Which descendants a sub-tree query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTreeMode {
    /// Every descendant at any depth, regardless of intermediate states.
    Full,
    /// Only descendants whose intermediate ancestors are all expanded.
    Visible,
}

/// Read-only structural view over a [`TreeRows`] list.
pub struct LevelIndex<'a, R: TreeRows + ?Sized> {
    rows: &'a R,
}

impl<'a, R: TreeRows + ?Sized> LevelIndex<'a, R> {
    /// Create an index over `rows`.
    pub fn new(rows: &'a R) -> Self {
        Self { rows }
    }

    /// Number of rows in the underlying list.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the underlying list is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Level of a row.
    pub fn level(&self, row: usize) -> Result<u16, TreeError> {
        self.check(row)?;
        Ok(self.rows.level(row))
    }

    /// Rows nested under `row`, in list order.
    ///
    /// The walk keeps a stack of open ancestors between `row` and the current
    /// candidate. A level more than one step deeper than the preceding row is
    /// a structural error, reported in both modes.
    pub fn sub_tree(&self, row: usize, mode: SubTreeMode) -> Result<Vec<usize>, TreeError> {
        self.check(row)?;
        let base = self.rows.level(row);
        let mut collection = Vec::new();
        let mut ancestors: Vec<usize> = Vec::new();
        let mut preceding: Option<usize> = None;

        for index in row + 1..self.rows.len() {
            let level = self.rows.level(index);
            if level <= base {
                break;
            }

            let level_change = i64::from(level) - i64::from(base) - ancestors.len() as i64 - 1;
            match (level_change, preceding) {
                (change, _) if change < 0 => {
                    let keep = ancestors.len() - change.unsigned_abs() as usize;
                    ancestors.truncate(keep);
                }
                (0, _) => {}
                (1, Some(previous)) => ancestors.push(previous),
                _ => return Err(self.malformed(index, base, preceding)),
            }

            let include = match mode {
                SubTreeMode::Full => true,
                SubTreeMode::Visible => ancestors
                    .iter()
                    .all(|&ancestor| self.rows.state(ancestor) == RowState::Expanded),
            };
            if include {
                collection.push(index);
            }
            preceding = Some(index);
        }

        Ok(collection)
    }

    /// Exclusive end of the contiguous range of rows nested under `row`.
    pub fn end_of_sub_tree(&self, row: usize) -> Result<usize, TreeError> {
        self.check(row)?;
        let base = self.rows.level(row);
        Ok((row + 1..self.rows.len())
            .find(|&index| self.rows.level(index) <= base)
            .unwrap_or(self.rows.len()))
    }

    /// Index range of the rows nested under `row`.
    pub fn descendant_range(&self, row: usize) -> Result<Range<usize>, TreeError> {
        Ok(row + 1..self.end_of_sub_tree(row)?)
    }

    /// Whether any row is nested under `row`.
    pub fn has_descendants(&self, row: usize) -> Result<bool, TreeError> {
        Ok(!self.descendant_range(row)?.is_empty())
    }

    /// Nearest preceding row with a strictly smaller level.
    pub fn parent(&self, row: usize) -> Result<Option<usize>, TreeError> {
        self.check(row)?;
        let level = self.rows.level(row);
        Ok((0..row).rev().find(|&index| self.rows.level(index) < level))
    }

    /// Rows exactly one level below `row` within its sub-tree.
    pub fn children(&self, row: usize) -> Result<Vec<usize>, TreeError> {
        let range = self.descendant_range(row)?;
        let child_level = self.rows.level(row).saturating_add(1);
        Ok(range
            .filter(|&index| self.rows.level(index) == child_level)
            .collect())
    }

    /// Check the whole list for levels jumping more than one step deeper.
    ///
    /// The first row may start at any base offset.
    pub fn validate(&self) -> Result<(), TreeError> {
        for index in 1..self.rows.len() {
            let max = self.rows.level(index - 1).saturating_add(1);
            let level = self.rows.level(index);
            if level > max {
                warn!("row {index} has level {level}, at most {max} allowed");
                return Err(TreeError::MalformedLevels {
                    row: index,
                    level,
                    max,
                });
            }
        }
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

    fn malformed(&self, row: usize, base: u16, preceding: Option<usize>) -> TreeError {
        let level = self.rows.level(row);
        let max = preceding
            .map_or(base, |previous| self.rows.level(previous))
            .saturating_add(1);
        warn!("treetable items are not in depth-first order: row {row} has level {level}, at most {max} allowed");
        TreeError::MalformedLevels { row, level, max }
    }
}
