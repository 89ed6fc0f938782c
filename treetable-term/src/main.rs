use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use treetable::config::{TREE_COLUMN_ATTR, TREE_EXPANDED_ATTR};
use treetable::{Document, Glyphs};
use treetable_term::browser::{Browser, Flow, Pane};
use treetable_term::tree_source::{SourceOptions, table_from_dir};
use treetable_term::{TermError, Terminal, paths};

const USAGE: &str = "usage: treetable-term [PATH...] [--expanded] [--column N] [--depth N] [--all] \
[--expand-glyph S] [--collapse-glyph S]";

#[derive(Debug)]
struct Args {
    paths: Vec<PathBuf>,
    column: usize,
    expanded: bool,
    source: SourceOptions,
    glyphs: Glyphs,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, TermError> {
    let mut parsed = Args {
        paths: Vec::new(),
        column: 0,
        expanded: false,
        source: SourceOptions::default(),
        glyphs: Glyphs::default(),
    };

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| TermError::Usage(format!("{name} needs a value\n{USAGE}")))
        };
        match arg.as_str() {
            "--expanded" => parsed.expanded = true,
            "--all" => parsed.source.show_hidden = true,
            "--column" => parsed.column = parse_number(&value("--column")?)?,
            "--depth" => parsed.source.max_depth = parse_number(&value("--depth")?)?,
            "--expand-glyph" => parsed.glyphs = parsed.glyphs.with_expand(&value("--expand-glyph")?),
            "--collapse-glyph" => {
                parsed.glyphs = parsed.glyphs.with_collapse(&value("--collapse-glyph")?)
            }
            "-h" | "--help" => return Err(TermError::Usage(USAGE.to_string())),
            flag if flag.starts_with("--") => {
                return Err(TermError::Usage(format!("unknown option {flag}\n{USAGE}")));
            }
            path => parsed.paths.push(PathBuf::from(path)),
        }
    }

    if parsed.paths.is_empty() {
        parsed.paths.push(PathBuf::from("."));
    }
    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, TermError> {
    raw.parse()
        .map_err(|_| TermError::Usage(format!("not a number: {raw}\n{USAGE}")))
}

fn run(args: Args) -> Result<(), TermError> {
    let mut document = Document::new();
    for path in &args.paths {
        let table = table_from_dir(path, &args.source)?
            .attribute(TREE_COLUMN_ATTR, args.column.to_string())
            .attribute(TREE_EXPANDED_ATTR, args.expanded.to_string());
        document = document.table(table);
    }

    let panes = args
        .paths
        .iter()
        .zip(document.into_tree_tables(&args.glyphs)?)
        .map(|(path, table)| Pane::new(path.display().to_string(), table))
        .collect();
    let mut browser = Browser::new(panes);
    info!("browsing {} tree tables", args.paths.len());

    let mut term = Terminal::new()?;
    loop {
        if browser.is_dirty() {
            let (width, height) = term.size()?;
            let buf = browser.render(width, height);
            term.draw(&buf)?;
        }

        for event in term.poll(Duration::from_millis(250))? {
            if browser.handle(&event)? == Flow::Quit {
                return Ok(());
            }
        }
    }
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    paths::rotate_logs();
    let log_path = paths::log_file();
    match File::create(&log_path) {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {e}", log_path.display()),
    }

    if let Err(e) = run(args) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
