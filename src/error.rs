// Error types for the inventory pipeline
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("inventory file not found: {0}")]
    NotFound(PathBuf),

    #[error("unable to parse {path} as a delimited table: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no hotel matches name '{0}'")]
    NoMatch(String),

    #[error("amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
