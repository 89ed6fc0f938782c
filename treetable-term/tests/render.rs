use treetable::{Glyphs, Row, TableConfig, TreeTable};
use treetable_term::render::column_widths;
use treetable_term::{Buffer, RenderOptions, render_table};

/// src/ (main.rs), Cargo.toml
fn table() -> TreeTable<Vec<Row>> {
    let rows = vec![
        Row::new(0).cell("src").cell("dir"),
        Row::new(1).cell("main.rs").cell("12 B"),
        Row::new(0).cell("Cargo.toml").cell("1 KB"),
    ];
    TreeTable::initialize(rows, TableConfig::default(), Glyphs::default()).unwrap()
}

fn lines(buf: &Buffer) -> Vec<String> {
    (0..buf.height())
        .map(|y| buf.line(y).trim_end().to_string())
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_column_widths_use_normalized_tree_cell() {
    // Widest tree cell: "Cargo.toml" plus control and gap.
    assert_eq!(column_widths(&table()), vec![12, 4]);
}

#[test]
fn test_collapsed_table_draws_roots_only() {
    let table = table();
    let mut buf = Buffer::new(20, 4);
    let hits = render_table(&table, &RenderOptions::default(), &mut buf);

    assert_eq!(
        lines(&buf),
        vec!["▸ src         dir", "  Cargo.toml  1 KB", "", ""]
    );
    assert_eq!(hits.lines(), &[0, 2]);
}

#[test]
fn test_expanded_row_draws_indented_children() {
    let mut table = table();
    table.activate(0).unwrap();

    let mut buf = Buffer::new(20, 4);
    render_table(&table, &RenderOptions::default(), &mut buf);

    assert_eq!(
        lines(&buf),
        vec![
            "▾ src         dir",
            "   main.rs    12 B",
            "  Cargo.toml  1 KB",
            "",
        ]
    );
}

#[test]
fn test_narrow_buffer_clips_columns() {
    let table = table();
    let mut buf = Buffer::new(10, 2);
    render_table(&table, &RenderOptions::default(), &mut buf);

    assert_eq!(lines(&buf), vec!["▸ src", "  Cargo.to"]);
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_control_hits_map_back_to_rows() {
    let table = table();
    let mut buf = Buffer::new(20, 4);
    let hits = render_table(&table, &RenderOptions::default(), &mut buf);

    assert_eq!(hits.control_at(0, 0), Some(0));
    assert_eq!(hits.control_at(1, 0), None);
    // Leaves have no control to click.
    assert_eq!(hits.control_at(0, 1), None);
    assert_eq!(hits.row_at(1), Some(2));
    assert_eq!(hits.row_at(2), None);
}

#[test]
fn test_top_offset_shifts_lines_and_hits() {
    let table = table();
    let options = RenderOptions {
        top: 1,
        ..RenderOptions::default()
    };
    let mut buf = Buffer::new(20, 3);
    let hits = render_table(&table, &options, &mut buf);

    assert_eq!(lines(&buf)[0], "");
    assert_eq!(hits.row_at(0), None);
    assert_eq!(hits.row_at(1), Some(0));
    assert_eq!(hits.control_at(0, 1), Some(0));
}

#[test]
fn test_scroll_skips_shown_rows() {
    let table = table();
    let options = RenderOptions {
        scroll: 1,
        ..RenderOptions::default()
    };
    let mut buf = Buffer::new(20, 2);
    let hits = render_table(&table, &options, &mut buf);

    assert_eq!(hits.lines(), &[2]);
    assert_eq!(lines(&buf)[0], "  Cargo.toml  1 KB");
}

#[test]
fn test_cursor_row_is_reversed() {
    let table = table();
    let options = RenderOptions {
        cursor: Some(2),
        ..RenderOptions::default()
    };
    let mut buf = Buffer::new(20, 2);
    render_table(&table, &options, &mut buf);

    assert!((0..20).all(|x| buf.get(x, 1).unwrap().reverse));
    assert!(!buf.get(0, 0).unwrap().reverse);
}
