use thiserror::Error;

/// Errors surfaced by storage and the command layer.
///
/// Store operations themselves never fail: a missing id is a no-op.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Note '{0}' not found")]
    NotFound(String),

    #[error("Id prefix '{0}' matches more than one note")]
    AmbiguousId(String),

    #[error("Invalid due date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid position ({0}, {1}). Coordinates must be finite numbers.")]
    InvalidPosition(f64, f64),
}

pub type Result<T> = std::result::Result<T, Error>;
