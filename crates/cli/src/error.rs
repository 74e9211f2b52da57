//! Error types for CLI operations.

use matchday_analysis::AnalysisError;
use thiserror::Error;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Command execution error.
    #[error("Command execution error: {0}")]
    Command(String),

    /// Registration attempted after the weekly cutoff.
    #[error("Registration is closed: {0}")]
    RegistrationClosed(String),

    /// Roster or configuration error from the core crate.
    #[error(transparent)]
    Core(#[from] matchday_core::Error),

    /// Transcript parsing or classification error.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
