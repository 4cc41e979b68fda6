use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Invalid rating {0}: quality must be between 0 and 5")]
    InvalidRating(i64),

    #[error("Invalid category '{0}': expected one of dev, concept, tool, workflow, debug, general")]
    InvalidCategory(String),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Corrupt collection: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
