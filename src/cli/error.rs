//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::{ApplicationError, ErrorKind};
use crate::infrastructure::StoreError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Json(_) => crate::exitcode::SOFTWARE,
            CliError::Application(ApplicationError::Store(e)) => match e {
                StoreError::Timeout { .. } => crate::exitcode::UNAVAILABLE,
                StoreError::Io { .. } => crate::exitcode::IOERR,
                StoreError::Corrupt { .. } | StoreError::Serialization(_) => {
                    crate::exitcode::SOFTWARE
                }
            },
            CliError::Application(e) => match e.kind() {
                ErrorKind::Validation => crate::exitcode::DATAERR,
                ErrorKind::NotFound => crate::exitcode::NOINPUT,
                ErrorKind::Config => crate::exitcode::CONFIG,
                ErrorKind::Store => crate::exitcode::SOFTWARE,
            },
        }
    }
}
