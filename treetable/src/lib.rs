//! Collapsible tree rendering for flat, level-annotated row lists.
//!
//! A table's rows carry only a nesting level. This crate recovers the implied
//! tree from the level sequence and keeps each row's visibility consistent
//! with the expand/collapse state of its ancestors:
//! - [`LevelIndex`] answers structural queries (sub-tree, parent, children);
//! - the [`expansion`] engine toggles rows and performs bulk initialization;
//! - [`TreeTable`] bundles rows, configuration and glyphs into one widget;
//! - [`Document`] discovers marked tables and initializes each of them.
//!
//! Rendering is left to the owner of the rows through the [`TreeRows`] trait.

pub mod config;
pub mod document;
pub mod error;
pub mod expansion;
pub mod glyphs;
pub mod level;
pub mod row;
pub mod table;

pub use config::TableConfig;
pub use document::{Document, TableElement, initialize_table};
pub use error::TreeError;
pub use glyphs::Glyphs;
pub use level::{LevelIndex, SubTreeMode};
pub use row::{ExpandControl, Row, RowState, TreeRows};
pub use table::TreeTable;
