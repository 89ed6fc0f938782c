use treetable::TreeError;

/// Errors surfaced by the terminal browser.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// Terminal or file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rows could not be initialized or toggled.
    #[error("tree table error: {0}")]
    Tree(#[from] TreeError),

    /// Invalid command line.
    #[error("{0}")]
    Usage(String),
}
