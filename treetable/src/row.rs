//! Row records and the row list contract.

use unicode_width::UnicodeWidthStr;

/// Width of the expand control in terminal cells, independent of the glyph.
pub const CONTROL_WIDTH: usize = 1;

/// Space between the expand control and the cell text.
pub const CONTROL_GAP: usize = 1;

/// Expansion state marker of a row.
///
/// `Leaf` is distinct from `Collapsed`: a row without descendants never
/// carries a marker, and activating it must not attempt a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowState {
    /// Descendants are shown (subject to their own ancestors).
    Expanded,
    /// Descendants are hidden.
    Collapsed,
    /// No marker.
    #[default]
    Leaf,
}

impl RowState {
    /// Tri-state view of the marker: `None` for leaves.
    pub fn is_expanded(self) -> Option<bool> {
        match self {
            Self::Expanded => Some(true),
            Self::Collapsed => Some(false),
            Self::Leaf => None,
        }
    }

    /// Marker for the given expansion flag.
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }
}

/// An ordered, level-annotated row list owned by the rendering layer.
///
/// Rows are addressed by their index in list order. The list encodes a
/// depth-first pre-order traversal: each row's level is at most one deeper
/// than its predecessor's. Implementations only store what they are told;
/// all structure is recovered from levels by [`crate::LevelIndex`].
pub trait TreeRows {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Whether the list has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared nesting depth of a row.
    fn level(&self, index: usize) -> u16;

    /// Current state marker of a row.
    fn state(&self, index: usize) -> RowState;

    /// Replace a row's state marker and its displayed indicator.
    ///
    /// `glyph` is empty when `state` is [`RowState::Leaf`].
    fn set_state(&mut self, index: usize, state: RowState, glyph: &str);

    /// Whether the row is currently hidden.
    fn is_hidden(&self, index: usize) -> bool;

    /// Hide or show a row.
    fn set_hidden(&mut self, index: usize, hidden: bool);

    /// Whether the row has a cell at `column`.
    fn has_cell(&self, index: usize, column: usize) -> bool;

    /// Insert the expand control at the start of the row's cell at `column`.
    fn attach_control(&mut self, index: usize, column: usize, indent: u16);

    /// Display width of the row's cell at `column`, if it exists.
    fn cell_width(&self, index: usize, column: usize) -> Option<usize>;

    /// Force the display width of the row's cell at `column`.
    fn set_cell_width(&mut self, index: usize, column: usize, width: usize);
}

impl<R: TreeRows + ?Sized> TreeRows for &mut R {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn level(&self, index: usize) -> u16 {
        (**self).level(index)
    }

    fn state(&self, index: usize) -> RowState {
        (**self).state(index)
    }

    fn set_state(&mut self, index: usize, state: RowState, glyph: &str) {
        (**self).set_state(index, state, glyph)
    }

    fn is_hidden(&self, index: usize) -> bool {
        (**self).is_hidden(index)
    }

    fn set_hidden(&mut self, index: usize, hidden: bool) {
        (**self).set_hidden(index, hidden)
    }

    fn has_cell(&self, index: usize, column: usize) -> bool {
        (**self).has_cell(index, column)
    }

    fn attach_control(&mut self, index: usize, column: usize, indent: u16) {
        (**self).attach_control(index, column, indent)
    }

    fn cell_width(&self, index: usize, column: usize) -> Option<usize> {
        (**self).cell_width(index, column)
    }

    fn set_cell_width(&mut self, index: usize, column: usize, width: usize) {
        (**self).set_cell_width(index, column, width)
    }
}

/// Clickable expand/collapse indicator inserted in a row's tree cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandControl {
    /// Column holding the control.
    pub column: usize,
    /// Indentation in cells (the row's level).
    pub indent: u16,
    /// Displayed indicator, empty for leaves.
    pub glyph: String,
}

impl ExpandControl {
    /// Cells taken by indentation, control and gap.
    pub fn prefix_width(&self) -> usize {
        self.indent as usize + CONTROL_WIDTH + CONTROL_GAP
    }
}

/// In-memory row record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// Nesting depth.
    pub level: u16,
    /// Cell texts, left to right.
    pub cells: Vec<String>,
    /// Expansion marker.
    pub state: RowState,
    /// Render visibility.
    pub hidden: bool,
    /// Expand control, once attached.
    pub control: Option<ExpandControl>,
    /// Normalized tree cell width, once laid out.
    pub tree_cell_width: Option<usize>,
}

impl Row {
    /// Create a row at `level` with no cells.
    pub fn new(level: u16) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Append a cell.
    pub fn cell(mut self, text: impl Into<String>) -> Self {
        self.cells.push(text.into());
        self
    }

    /// Replace all cells.
    pub fn cells<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cells = cells.into_iter().map(Into::into).collect();
        self
    }

    /// Text of the cell at `column`.
    pub fn text(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Displayed glyph, empty if no control is attached or the row is a leaf.
    pub fn glyph(&self) -> &str {
        self.control.as_ref().map_or("", |c| c.glyph.as_str())
    }

    fn natural_width(&self, column: usize) -> Option<usize> {
        let text = self.cells.get(column)?;
        let prefix = match &self.control {
            Some(control) if control.column == column => control.prefix_width(),
            _ => 0,
        };
        Some(prefix + text.width())
    }
}

impl TreeRows for Vec<Row> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn level(&self, index: usize) -> u16 {
        self[index].level
    }

    fn state(&self, index: usize) -> RowState {
        self[index].state
    }

    fn set_state(&mut self, index: usize, state: RowState, glyph: &str) {
        let row = &mut self[index];
        row.state = state;
        if let Some(control) = row.control.as_mut() {
            control.glyph = glyph.to_string();
        }
    }

    fn is_hidden(&self, index: usize) -> bool {
        self[index].hidden
    }

    fn set_hidden(&mut self, index: usize, hidden: bool) {
        self[index].hidden = hidden;
    }

    fn has_cell(&self, index: usize, column: usize) -> bool {
        column < self[index].cells.len()
    }

    fn attach_control(&mut self, index: usize, column: usize, indent: u16) {
        self[index].control = Some(ExpandControl {
            column,
            indent,
            glyph: String::new(),
        });
    }

    fn cell_width(&self, index: usize, column: usize) -> Option<usize> {
        let row = &self[index];
        let natural = row.natural_width(column)?;
        match (&row.control, row.tree_cell_width) {
            (Some(control), Some(width)) if control.column == column => Some(width.max(natural)),
            _ => Some(natural),
        }
    }

    fn set_cell_width(&mut self, index: usize, column: usize, width: usize) {
        let row = &mut self[index];
        if row.control.as_ref().is_some_and(|c| c.column == column) {
            row.tree_cell_width = Some(width);
        }
    }
}
