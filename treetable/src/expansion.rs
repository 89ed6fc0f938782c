//! Expansion engine: toggling rows and bulk initialization.

use log::{debug, trace, warn};

use crate::config::TableConfig;
use crate::error::TreeError;
use crate::glyphs::Glyphs;
use crate::level::{LevelIndex, SubTreeMode};
use crate::row::{RowState, TreeRows};

/// Expand or collapse `row`.
///
/// Collapsing hides every row of the sub-tree. Expanding shows the direct
/// children plus whatever sits below children that are themselves expanded.
/// The sub-tree is enumerated before anything is mutated, so a structural
/// error leaves the list untouched. A row without descendants is left alone
/// and never acquires a state marker. Expanding a hidden row only updates
/// its marker; its descendants appear once its ancestors are expanded.
pub fn toggle<R: TreeRows + ?Sized>(
    rows: &mut R,
    row: usize,
    currently_expanded: bool,
    glyphs: &Glyphs,
) -> Result<(), TreeError> {
    glyphs.validate()?;

    let mode = if currently_expanded {
        SubTreeMode::Full
    } else {
        SubTreeMode::Visible
    };
    let sub_tree = LevelIndex::new(&*rows).sub_tree(row, mode)?;
    if sub_tree.is_empty() {
        trace!("row {row} is a leaf, nothing to toggle");
        return Ok(());
    }

    let state = RowState::from_expanded(!currently_expanded);
    rows.set_state(row, state, glyphs.for_state(state));

    // A hidden row has a collapsed ancestor: its descendants stay hidden.
    if !currently_expanded && rows.is_hidden(row) {
        debug!("row {row} expanded while hidden, {} rows stay hidden", sub_tree.len());
        return Ok(());
    }

    for &index in &sub_tree {
        rows.set_hidden(index, currently_expanded);
    }
    debug!(
        "row {row} {}: {} rows {}",
        if currently_expanded { "collapsed" } else { "expanded" },
        sub_tree.len(),
        if currently_expanded { "hidden" } else { "shown" },
    );
    Ok(())
}

/// Act on a user request to toggle `row`, reading its current marker.
///
/// Leaves are ignored; they are never treated as collapsed.
pub fn activate<R: TreeRows + ?Sized>(
    rows: &mut R,
    row: usize,
    glyphs: &Glyphs,
) -> Result<(), TreeError> {
    let len = rows.len();
    if row >= len {
        return Err(TreeError::RowOutOfRange { row, len });
    }

    match rows.state(row).is_expanded() {
        Some(expanded) => toggle(rows, row, expanded, glyphs),
        None => {
            trace!("ignoring activation of leaf row {row}");
            Ok(())
        }
    }
}

/// Attach expand controls and drive every row to the configured state.
///
/// Every row with a cell at the tree column gets a control indented by its
/// level and is expanded, top-down. The tree column is then measured (all
/// controls exist at this point), the rows are collapsed top-down unless the
/// table starts expanded, and the measured width is applied to every tree
/// cell so the column has a uniform width regardless of depth.
pub fn initialize<R: TreeRows + ?Sized>(
    rows: &mut R,
    config: &TableConfig,
    glyphs: &Glyphs,
) -> Result<(), TreeError> {
    glyphs.validate()?;
    LevelIndex::new(&*rows).validate()?;

    let column = config.tree_column;
    let tree_rows: Vec<usize> = (0..rows.len())
        .filter(|&index| rows.has_cell(index, column))
        .collect();
    if tree_rows.is_empty() {
        warn!("found not a single tree cell at column index {column}");
        return Err(TreeError::MissingTreeColumn { column });
    }

    for index in 0..rows.len() {
        rows.set_hidden(index, false);
        rows.set_state(index, RowState::Leaf, "");
    }
    for &index in &tree_rows {
        let level = rows.level(index);
        rows.attach_control(index, column, level);
    }
    for &index in &tree_rows {
        toggle(rows, index, false, glyphs)?;
    }

    let width = tree_rows
        .iter()
        .filter_map(|&index| rows.cell_width(index, column))
        .max()
        .unwrap_or(0);

    if !config.initially_expanded {
        for &index in &tree_rows {
            toggle(rows, index, true, glyphs)?;
        }
    }

    for &index in &tree_rows {
        rows.set_cell_width(index, column, width);
    }

    debug!(
        "initialized {} tree rows at column {column} ({}), tree column width {width}",
        tree_rows.len(),
        if config.initially_expanded { "expanded" } else { "collapsed" },
    );
    Ok(())
}
