//! Terminal front end for `treetable`.
//!
//! Draws tree tables into a character [`Buffer`], maps mouse clicks on expand
//! controls back to rows, and flushes frames to a crossterm [`Terminal`].
//! The [`browser`] module turns terminal events into row toggles.

pub mod browser;
pub mod buffer;
pub mod error;
pub mod paths;
pub mod render;
pub mod terminal;
pub mod text;
pub mod tree_source;

pub use buffer::{Buffer, Cell};
pub use error::TermError;
pub use render::{HitMap, RenderOptions, render_table};
pub use terminal::Terminal;
pub use tree_source::{SourceOptions, table_from_dir};
