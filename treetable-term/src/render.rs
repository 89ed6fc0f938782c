//! Drawing a tree table into a [`Buffer`].
//!
//! Each shown row takes one line. Columns are laid out side by side using the
//! widest cell of each column; the tree column already carries a normalized
//! width from initialization, so its cells line up regardless of depth.

use treetable::row::{CONTROL_GAP, CONTROL_WIDTH};
use treetable::{Row, TreeRows, TreeTable};

use crate::buffer::Buffer;
use crate::text::truncate_to_width;

/// Layout and cursor settings for [`render_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Blank cells between columns.
    pub column_gap: u16,
    /// Row drawn highlighted.
    pub cursor: Option<usize>,
    /// Number of shown rows skipped at the top.
    pub scroll: usize,
    /// First buffer line used by the table.
    pub top: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            column_gap: 2,
            cursor: None,
            scroll: 0,
            top: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlHit {
    x: u16,
    y: u16,
    width: u16,
    row: usize,
}

/// Screen positions produced by the last render, mapped back to rows.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    top: u16,
    controls: Vec<ControlHit>,
    lines: Vec<usize>,
}

impl HitMap {
    /// Row whose expand control covers `(x, y)`.
    pub fn control_at(&self, x: u16, y: u16) -> Option<usize> {
        self.controls
            .iter()
            .find(|hit| hit.y == y && x >= hit.x && x < hit.x.saturating_add(hit.width))
            .map(|hit| hit.row)
    }

    /// Row drawn on line `y`.
    pub fn row_at(&self, y: u16) -> Option<usize> {
        let line = y.checked_sub(self.top)?;
        self.lines.get(line as usize).copied()
    }

    /// Rows drawn, one per line from the first table line.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }
}

/// Width of every column, measured over all rows.
pub fn column_widths<R>(table: &TreeTable<R>) -> Vec<usize>
where
    R: TreeRows + AsRef<[Row]>,
{
    let rows = table.rows();
    let columns = rows.as_ref().iter().map(|r| r.cells.len()).max().unwrap_or(0);
    (0..columns)
        .map(|column| {
            (0..rows.len())
                .filter_map(|index| rows.cell_width(index, column))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Draw the shown rows of `table` into `buf`.
pub fn render_table<R>(table: &TreeTable<R>, options: &RenderOptions, buf: &mut Buffer) -> HitMap
where
    R: TreeRows + AsRef<[Row]>,
{
    let widths = column_widths(table);
    let rows = table.rows().as_ref();
    let mut hits = HitMap {
        top: options.top,
        ..HitMap::default()
    };

    let shown = table.visible_rows();
    let lines = shown
        .iter()
        .skip(options.scroll)
        .take(buf.height().saturating_sub(options.top) as usize)
        .enumerate();

    for (line, &index) in lines {
        let y = options.top + line as u16;
        let row = &rows[index];
        let mut x: u16 = 0;

        for (column, &width) in widths.iter().enumerate() {
            let end = x.saturating_add(u16::try_from(width).unwrap_or(u16::MAX));
            if let Some(text) = row.text(column) {
                let mut text_x = x;
                if let Some(control) = row.control.as_ref().filter(|c| c.column == column) {
                    let glyph_x = x.saturating_add(control.indent);
                    let glyph_end = glyph_x.saturating_add(CONTROL_WIDTH as u16);
                    buf.put_str(glyph_x, y, &control.glyph, glyph_end);
                    if !control.glyph.is_empty() {
                        hits.controls.push(ControlHit {
                            x: glyph_x,
                            y,
                            width: CONTROL_WIDTH as u16,
                            row: index,
                        });
                    }
                    text_x = glyph_end.saturating_add(CONTROL_GAP as u16);
                }
                let available = end.saturating_sub(text_x) as usize;
                buf.put_str(text_x, y, &truncate_to_width(text, available), end);
            }
            x = end.saturating_add(options.column_gap);
        }

        if options.cursor == Some(index) {
            for cx in 0..buf.width() {
                if let Some(cell) = buf.get_mut(cx, y) {
                    cell.reverse = true;
                }
            }
        }
        hits.lines.push(index);
    }

    hits
}
