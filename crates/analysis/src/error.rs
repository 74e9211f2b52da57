use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A keyword or grammar pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(String),
    /// I/O operation error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Input rejected before parsing, such as text that is not a transcript.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl From<regex::Error> for AnalysisError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
