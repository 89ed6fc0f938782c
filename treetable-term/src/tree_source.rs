//! Building tree-table rows from a directory walk.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use treetable::config::MARKER_CLASS;
use treetable::{Row, TableElement};

/// How much of the file system to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Deepest level read below the root (the root itself is level 0).
    pub max_depth: u16,
    /// Include entries whose name starts with a dot.
    pub show_hidden: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_depth: 8,
            show_hidden: false,
        }
    }
}

struct Entry {
    name: String,
    size: u64,
    is_dir: bool,
}

/// Human-readable size, `<DIR>` for directories.
pub fn size_display(size: u64, is_dir: bool) -> String {
    if is_dir {
        "<DIR>".to_string()
    } else if size < 1024 {
        format!("{size} B")
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// Read `root` into a tree-table element, rows in depth-first pre-order.
///
/// Each row has a name cell and a size cell; directories come before files,
/// both sorted by name. Subdirectories that cannot be read are logged and
/// shown without children.
pub fn table_from_dir(root: &Path, options: &SourceOptions) -> io::Result<TableElement> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut rows = vec![Row::new(0).cells([name, size_display(0, true)])];
    let entries = read_entries(root, options)?;
    push_entries(root, entries, 1, options, &mut rows);

    Ok(TableElement {
        rows,
        ..TableElement::new().class(MARKER_CLASS)
    })
}

fn push_entries(dir: &Path, entries: Vec<Entry>, level: u16, options: &SourceOptions, rows: &mut Vec<Row>) {
    for entry in entries {
        rows.push(Row::new(level).cells([entry.name.clone(), size_display(entry.size, entry.is_dir)]));

        if entry.is_dir && level < options.max_depth {
            let path = dir.join(&entry.name);
            match read_entries(&path, options) {
                Ok(children) => push_entries(&path, children, level + 1, options, rows),
                Err(e) => warn!("cannot read {}: {e}", path.display()),
            }
        }
    }
}

fn read_entries(dir: &Path, options: &SourceOptions) -> io::Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if !options.show_hidden && name.starts_with('.') {
                return None;
            }
            let metadata = e.metadata().ok()?;
            Some(Entry {
                name,
                size: metadata.len(),
                is_dir: metadata.is_dir(),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(entries)
}
