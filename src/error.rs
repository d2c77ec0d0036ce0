use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "remote")]
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("No entry with ID {0}")]
    NotFound(String),

    #[error("No entries in the selected period")]
    EmptyReport,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PayError>;
