use std::path::PathBuf;

use thiserror::Error;

use crate::app::domain::ItemId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No item with id {0}")]
    NotFound(ItemId),

    #[error("{field} must not contain '{found}'")]
    InvalidField { field: &'static str, found: char },

    #[error("Viewer error: {0}")]
    Viewer(String),

    #[error("{} failed to load; not overwriting it", .0.display())]
    LoadFailed(PathBuf),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
