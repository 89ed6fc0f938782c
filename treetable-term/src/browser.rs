//! Interactive state of the tree-table browser.
//!
//! Input handling is kept apart from the terminal so it can run against
//! synthetic crossterm events.

use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, trace};
use treetable::{Row, RowState, TreeError, TreeTable};

use crate::buffer::Buffer;
use crate::render::{HitMap, RenderOptions, render_table};

/// Lines above the table (title bar).
const HEADER_LINES: u16 = 1;

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One browsable table with its cursor.
#[derive(Debug)]
pub struct Pane {
    pub title: String,
    pub table: TreeTable<Vec<Row>>,
    cursor: usize,
    scroll: usize,
}

impl Pane {
    pub fn new(title: impl Into<String>, table: TreeTable<Vec<Row>>) -> Self {
        Self {
            title: title.into(),
            table,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Row under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Browser over one or more tree tables.
#[derive(Debug)]
pub struct Browser {
    panes: Vec<Pane>,
    active: usize,
    hits: HitMap,
    viewport: usize,
    dirty: bool,
}

impl Browser {
    pub fn new(panes: Vec<Pane>) -> Self {
        Self {
            panes,
            active: 0,
            hits: HitMap::default(),
            viewport: 0,
            dirty: true,
        }
    }

    /// The pane receiving input.
    pub fn active(&self) -> Option<&Pane> {
        self.panes.get(self.active)
    }

    fn active_mut(&mut self) -> Option<&mut Pane> {
        self.panes.get_mut(self.active)
    }

    /// Whether a new frame must be drawn.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.active().is_some_and(|p| p.table.is_dirty())
    }

    /// Draw the active pane into a fresh `width` x `height` buffer.
    pub fn render(&mut self, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::new(width, height);
        self.viewport = height.saturating_sub(HEADER_LINES) as usize;
        self.scroll_to_cursor();

        let count = self.panes.len();
        let active = self.active;
        let Some(pane) = self.panes.get_mut(active) else {
            buf.put_str(0, 0, "nothing to show", width);
            return buf;
        };

        let title = format!("{} ({}/{})  q quit  e/c expand/collapse all", pane.title, active + 1, count);
        buf.put_str(0, 0, &title, width);

        let options = RenderOptions {
            cursor: Some(pane.cursor),
            scroll: pane.scroll,
            top: HEADER_LINES,
            ..RenderOptions::default()
        };
        self.hits = render_table(&pane.table, &options, &mut buf);
        pane.table.clear_dirty();
        self.dirty = false;
        buf
    }

    /// Apply one terminal event.
    pub fn handle(&mut self, event: &CtEvent) -> Result<Flow, TreeError> {
        match event {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            CtEvent::Mouse(mouse) => {
                self.on_mouse(mouse)?;
                Ok(Flow::Continue)
            }
            CtEvent::Resize(..) => {
                self.dirty = true;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> Result<Flow, TreeError> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Tab if !self.panes.is_empty() => {
                self.active = (self.active + 1) % self.panes.len();
                self.dirty = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home => self.move_cursor(isize::MIN),
            KeyCode::End => self.move_cursor(isize::MAX),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_cursor()?,
            KeyCode::Right => self.expand_cursor()?,
            KeyCode::Left => self.collapse_or_parent()?,
            KeyCode::Char('e') => {
                if let Some(pane) = self.active_mut() {
                    pane.table.expand_all()?;
                }
            }
            KeyCode::Char('c') => {
                if let Some(pane) = self.active_mut() {
                    pane.table.collapse_all()?;
                }
                self.reveal_cursor()?;
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) -> Result<(), TreeError> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let control = self.hits.control_at(mouse.column, mouse.row);
                let line = self.hits.row_at(mouse.row);
                if let Some(pane) = self.active_mut() {
                    if let Some(row) = line {
                        pane.cursor = row;
                    }
                    if let Some(row) = control {
                        debug!("click on control of row {row}");
                        pane.table.activate(row)?;
                    }
                }
                self.dirty = true;
            }
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            _ => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(pane) = self.active_mut() else { return };
        let shown = pane.table.visible_rows();
        let Some(position) = shown.iter().position(|&row| row == pane.cursor) else {
            return;
        };
        let target = position.saturating_add_signed(delta).min(shown.len() - 1);
        pane.cursor = shown[target];
        trace!("cursor moved to row {}", pane.cursor);
        self.dirty = true;
    }

    fn activate_cursor(&mut self) -> Result<(), TreeError> {
        if let Some(pane) = self.active_mut() {
            pane.table.activate(pane.cursor)?;
        }
        Ok(())
    }

    fn expand_cursor(&mut self) -> Result<(), TreeError> {
        if let Some(pane) = self.active_mut()
            && pane.table.state(pane.cursor)? == RowState::Collapsed
        {
            pane.table.toggle(pane.cursor, false)?;
        }
        Ok(())
    }

    fn collapse_or_parent(&mut self) -> Result<(), TreeError> {
        let Some(pane) = self.active_mut() else {
            return Ok(());
        };
        if pane.table.state(pane.cursor)? == RowState::Expanded {
            pane.table.toggle(pane.cursor, true)?;
        } else if let Some(parent) = pane.table.index().parent(pane.cursor)? {
            pane.cursor = parent;
            self.dirty = true;
        }
        Ok(())
    }

    /// Move the cursor up to its nearest shown ancestor.
    fn reveal_cursor(&mut self) -> Result<(), TreeError> {
        let Some(pane) = self.active_mut() else {
            return Ok(());
        };
        while !pane.table.is_visible(pane.cursor)? {
            match pane.table.index().parent(pane.cursor)? {
                Some(parent) => pane.cursor = parent,
                None => break,
            }
        }
        Ok(())
    }

    fn scroll_to_cursor(&mut self) {
        let viewport = self.viewport;
        let Some(pane) = self.active_mut() else { return };
        if viewport == 0 {
            return;
        }
        let shown = pane.table.visible_rows();
        let Some(line) = shown.iter().position(|&row| row == pane.cursor) else {
            return;
        };
        if line < pane.scroll {
            pane.scroll = line;
        } else if line >= pane.scroll + viewport {
            pane.scroll = line + 1 - viewport;
        }
        pane.scroll = pane.scroll.min(shown.len().saturating_sub(viewport));
    }
}
