//! Error types for Matchday core functionality.

use thiserror::Error;

/// Main error type for Matchday.
#[derive(Error, Debug)]
pub enum Error {
    /// A player with the same name (ignoring case) is already registered.
    #[error("{0} is already registered")]
    DuplicateName(String),
    /// Registration attempted with a blank name.
    #[error("player name must not be empty")]
    EmptyName,
    /// No roster entry carries the given name.
    #[error("player not found: {0}")]
    NotFound(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Data parsing error: {0}")]
    Parse(String),
    #[error("File system error: {0}")]
    FileSystem(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Matchday operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error is a rejected registration the caller can recover from.
    pub fn is_registration_rejection(&self) -> bool {
        matches!(self, Self::DuplicateName(_) | Self::EmptyName)
    }
}
