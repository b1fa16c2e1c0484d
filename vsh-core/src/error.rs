//! Error types for the virtual shell

use thiserror::Error;

/// Result type alias
pub type VshResult<T> = Result<T, VshError>;

/// Main error type
#[derive(Error, Debug)]
pub enum VshError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VshError {
    /// Only an unreadable archive stops the shell; everything else is
    /// reported and the command loop carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VshError::InvalidArchive(_))
    }
}
