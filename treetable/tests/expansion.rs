use treetable::expansion;
use treetable::glyphs::{DEFAULT_COLLAPSE, DEFAULT_EXPAND};
use treetable::row::{CONTROL_GAP, CONTROL_WIDTH};
use treetable::{Glyphs, Row, RowState, TableConfig, TreeError, TreeTable};

fn rows(levels: &[u16]) -> Vec<Row> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Row::new(level).cell(format!("row {i}")))
        .collect()
}

/// A(0), B(1), C(2), D(1), E(0)
fn sample(initially_expanded: bool) -> TreeTable<Vec<Row>> {
    TreeTable::initialize(
        rows(&[0, 1, 2, 1, 0]),
        TableConfig::new(0, initially_expanded),
        Glyphs::default(),
    )
    .unwrap()
}

fn snapshot(table: &TreeTable<Vec<Row>>) -> Vec<(bool, RowState)> {
    table.rows().iter().map(|r| (r.hidden, r.state)).collect()
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_initially_collapsed_shows_only_roots() {
    let table = sample(false);

    assert_eq!(table.visible_rows(), vec![0, 4]);
    assert_eq!(table.state(0), Ok(RowState::Collapsed));
    assert_eq!(table.state(1), Ok(RowState::Collapsed));
    assert_eq!(table.state(2), Ok(RowState::Leaf));
    assert_eq!(table.state(3), Ok(RowState::Leaf));
    assert_eq!(table.state(4), Ok(RowState::Leaf));
}

#[test]
fn test_initially_expanded_shows_everything() {
    let table = sample(true);

    assert_eq!(table.visible_rows(), vec![0, 1, 2, 3, 4]);
    assert_eq!(table.state(0), Ok(RowState::Expanded));
    assert_eq!(table.state(1), Ok(RowState::Expanded));
    assert_eq!(table.state(2), Ok(RowState::Leaf));
}

#[test]
fn test_controls_show_glyph_for_state() {
    let table = sample(false);
    let rows = table.rows();

    assert_eq!(rows[0].glyph(), DEFAULT_EXPAND);
    assert_eq!(rows[2].glyph(), "");
    assert_eq!(rows[2].control.as_ref().map(|c| c.indent), Some(2));

    let table = sample(true);
    assert_eq!(table.rows()[0].glyph(), DEFAULT_COLLAPSE);
}

#[test]
fn test_custom_glyphs() {
    let table = TreeTable::initialize(
        rows(&[0, 1]),
        TableConfig::default(),
        Glyphs::new("+", "-"),
    )
    .unwrap();
    assert_eq!(table.rows()[0].glyph(), "+");

    let mut table = table;
    table.activate(0).unwrap();
    assert_eq!(table.rows()[0].glyph(), "-");
}

#[test]
fn test_tree_column_width_is_uniform() {
    let rows = vec![
        Row::new(0).cell("a").cell("x"),
        Row::new(1).cell("bb").cell("y"),
        Row::new(2).cell("ccc").cell("z"),
    ];
    let table = TreeTable::initialize(rows, TableConfig::default(), Glyphs::default()).unwrap();
    let expected = 2 + CONTROL_WIDTH + CONTROL_GAP + 3;

    for row in table.rows() {
        assert_eq!(row.tree_cell_width, Some(expected));
    }
}

#[test]
fn test_rows_without_tree_cell_get_no_control() {
    let rows = vec![
        Row::new(0).cell("header"),
        Row::new(0).cell("a").cell("src"),
        Row::new(1).cell("b").cell("main.rs"),
    ];
    let table = TreeTable::initialize(rows, TableConfig::new(1, false), Glyphs::default()).unwrap();

    assert!(table.rows()[0].control.is_none());
    assert_eq!(table.rows()[1].control.as_ref().map(|c| c.column), Some(1));
    assert_eq!(table.visible_rows(), vec![0, 1]);
}

#[test]
fn test_missing_tree_column() {
    let err = TreeTable::initialize(rows(&[0, 1]), TableConfig::new(3, false), Glyphs::default())
        .unwrap_err();
    assert_eq!(err, TreeError::MissingTreeColumn { column: 3 });

    let err = TreeTable::initialize(Vec::<Row>::new(), TableConfig::default(), Glyphs::default())
        .unwrap_err();
    assert_eq!(err, TreeError::MissingTreeColumn { column: 0 });
}

#[test]
fn test_initialize_rejects_malformed_levels_before_mutating() {
    let mut rows = rows(&[0, 2]);
    let err = expansion::initialize(&mut rows, &TableConfig::default(), &Glyphs::default())
        .unwrap_err();

    assert!(err.is_malformed());
    assert!(rows.iter().all(|r| r.control.is_none() && !r.hidden));
}

#[test]
fn test_initialize_requires_glyphs() {
    let err = TreeTable::initialize(rows(&[0, 1]), TableConfig::default(), Glyphs::new("", ""))
        .unwrap_err();
    assert_eq!(err, TreeError::MissingGlyphs);
}

// ============================================================================
// Toggle scenarios
// ============================================================================

#[test]
fn test_expand_reveals_direct_children_only() {
    let mut table = sample(false);

    table.toggle(0, false).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 3, 4]);
    assert_eq!(table.state(0), Ok(RowState::Expanded));
    assert_eq!(table.state(1), Ok(RowState::Collapsed));

    table.toggle(1, false).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 2, 3, 4]);
    assert_eq!(table.state(1), Ok(RowState::Expanded));
}

#[test]
fn test_collapse_hides_whole_sub_tree_and_keeps_markers() {
    let mut table = sample(true);

    table.toggle(0, true).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 4]);
    assert_eq!(table.state(0), Ok(RowState::Collapsed));
    assert_eq!(table.state(1), Ok(RowState::Expanded));
    assert_eq!(table.state(2), Ok(RowState::Leaf));

    // B kept its marker, so C comes back with A.
    table.toggle(0, false).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_collapsed_child_stays_collapsed_when_parent_reexpands() {
    let mut table = sample(true);

    table.toggle(1, true).unwrap();
    table.toggle(0, true).unwrap();
    table.toggle(0, false).unwrap();

    assert_eq!(table.visible_rows(), vec![0, 1, 3, 4]);
    assert!(!table.is_visible(2).unwrap());
}

#[test]
fn test_collapse_is_complete_regardless_of_markers() {
    // R(0) A(1) B(2) C(3) D(2) E(1) F(2)
    let mut table = TreeTable::initialize(
        rows(&[0, 1, 2, 3, 2, 1, 2]),
        TableConfig::new(0, true),
        Glyphs::default(),
    )
    .unwrap();
    table.toggle(2, true).unwrap();
    table.toggle(5, true).unwrap();

    table.toggle(0, true).unwrap();
    assert_eq!(table.visible_rows(), vec![0]);
}

#[test]
fn test_expand_reveals_visible_subset_recursively() {
    // R(0) A(1) B(2) C(3) D(2) E(1) F(2)
    let mut table = TreeTable::initialize(
        rows(&[0, 1, 2, 3, 2, 1, 2]),
        TableConfig::new(0, true),
        Glyphs::default(),
    )
    .unwrap();
    table.toggle(2, true).unwrap();
    table.toggle(5, true).unwrap();
    table.toggle(0, true).unwrap();

    table.toggle(0, false).unwrap();
    // A expanded: B and D show, C stays under collapsed B; E collapsed hides F.
    assert_eq!(table.visible_rows(), vec![0, 1, 2, 4, 5]);
}

#[test]
fn test_round_trip_restores_sub_tree() {
    let mut table = TreeTable::initialize(
        rows(&[0, 1, 2, 3, 2, 1, 2, 0, 1]),
        TableConfig::new(0, true),
        Glyphs::default(),
    )
    .unwrap();
    table.toggle(2, true).unwrap();
    table.toggle(5, true).unwrap();

    for row in [0, 1, 7] {
        let before = snapshot(&table);
        table.toggle(row, true).unwrap();
        assert_ne!(snapshot(&table), before);
        table.toggle(row, false).unwrap();
        assert_eq!(snapshot(&table), before, "round trip through row {row}");
    }
}

#[test]
fn test_leaf_toggle_changes_nothing() {
    let mut table = sample(false);
    table.toggle(0, false).unwrap();
    let before = snapshot(&table);

    for currently_expanded in [true, false] {
        table.toggle(3, currently_expanded).unwrap();
        table.toggle(4, currently_expanded).unwrap();
        assert_eq!(snapshot(&table), before);
    }
    assert_eq!(table.rows()[3].glyph(), "");
}

#[test]
fn test_activate_reads_marker() {
    let mut table = sample(false);

    table.activate(0).unwrap();
    assert_eq!(table.state(0), Ok(RowState::Expanded));
    table.activate(0).unwrap();
    assert_eq!(table.state(0), Ok(RowState::Collapsed));
    assert_eq!(table.visible_rows(), vec![0, 4]);
}

#[test]
fn test_activate_ignores_leaf() {
    let mut table = sample(true);
    let before = snapshot(&table);

    table.activate(2).unwrap();
    assert_eq!(snapshot(&table), before);
    assert_eq!(table.state(2), Ok(RowState::Leaf));
}

#[test]
fn test_activate_out_of_range() {
    let mut table = sample(false);
    assert_eq!(
        table.activate(5),
        Err(TreeError::RowOutOfRange { row: 5, len: 5 })
    );
    assert!(table.state(5).is_err());
}

#[test]
fn test_toggle_malformed_levels_leaves_rows_untouched() {
    let mut rows = rows(&[0, 1, 3]);
    let glyphs = Glyphs::default();

    let err = expansion::toggle(&mut rows, 0, true, &glyphs).unwrap_err();
    assert!(err.is_malformed());
    assert!(rows.iter().all(|r| !r.hidden && r.state == RowState::Leaf));
}

#[test]
fn test_toggle_requires_glyphs() {
    let mut rows = rows(&[0, 1]);
    let glyphs = Glyphs::new("", DEFAULT_COLLAPSE);

    assert_eq!(
        expansion::toggle(&mut rows, 0, false, &glyphs),
        Err(TreeError::MissingGlyphs)
    );
}

#[test]
fn test_expanding_hidden_row_keeps_descendants_hidden() {
    let mut table =
        TreeTable::initialize(rows(&[0, 1, 2]), TableConfig::default(), Glyphs::default()).unwrap();
    assert_eq!(table.visible_rows(), vec![0]);

    table.activate(1).unwrap();
    assert_eq!(table.state(1), Ok(RowState::Expanded));
    assert_eq!(table.rows()[1].glyph(), DEFAULT_COLLAPSE);
    assert_eq!(table.visible_rows(), vec![0]);

    // The marker takes effect once the parent is expanded.
    table.activate(0).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 2]);
}

#[test]
fn test_collapsing_hidden_row_keeps_it_hidden() {
    let mut table = sample(true);
    table.toggle(0, true).unwrap();

    table.toggle(1, true).unwrap();
    assert_eq!(table.state(1), Ok(RowState::Collapsed));
    assert_eq!(table.visible_rows(), vec![0, 4]);

    table.toggle(0, false).unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 3, 4]);
}

// ============================================================================
// Bulk operations and dirty tracking
// ============================================================================

#[test]
fn test_table_keeps_its_configuration() {
    let glyphs = Glyphs::new("+", "-");
    let table = TreeTable::initialize(rows(&[0, 1]), TableConfig::new(0, true), glyphs.clone())
        .unwrap();

    assert_eq!(table.config(), &TableConfig::new(0, true));
    assert_eq!(table.glyphs(), &glyphs);

    let rows = table.into_rows();
    assert_eq!(rows[0].glyph(), "-");
    assert!(rows.iter().all(|row| !row.hidden));
}

#[test]
fn test_expand_all_and_collapse_all() {
    let mut table = sample(false);

    table.expand_all().unwrap();
    assert_eq!(table.visible_rows(), vec![0, 1, 2, 3, 4]);
    assert_eq!(table.state(1), Ok(RowState::Expanded));

    table.collapse_all().unwrap();
    assert_eq!(table.visible_rows(), vec![0, 4]);
    assert_eq!(table.state(1), Ok(RowState::Collapsed));
}

#[test]
fn test_dirty_tracking() {
    let mut table = sample(false);
    assert!(table.is_dirty());

    table.clear_dirty();
    assert!(!table.is_dirty());

    table.toggle(0, false).unwrap();
    assert!(table.is_dirty());
}
