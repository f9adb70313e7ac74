//! Application-level errors (wraps domain and store errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::StoreError;

/// Application errors wrap domain and store errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Coarse failure class, used to pick a transport status or exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Store,
    Config,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Domain(DomainError::Validation(_)) => ErrorKind::Validation,
            ApplicationError::Domain(DomainError::NotFound(_)) => ErrorKind::NotFound,
            ApplicationError::Store(_) => ErrorKind::Store,
            ApplicationError::Config { .. } => ErrorKind::Config,
        }
    }

    /// HTTP-style status for the hosting layer.
    pub fn status_code(&self) -> u16 {
        match self {
            ApplicationError::Domain(DomainError::Validation(_)) => 400,
            ApplicationError::Domain(DomainError::NotFound(_)) => 404,
            ApplicationError::Store(e) if e.is_timeout() => 503,
            ApplicationError::Store(_) | ApplicationError::Config { .. } => 500,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_each_failure_when_mapping_then_matches_transport_contract() {
        let validation: ApplicationError =
            DomainError::Validation("Name is required".into()).into();
        let not_found: ApplicationError = DomainError::NotFound("x".into()).into();
        let timeout: ApplicationError = StoreError::Timeout {
            operation: "find_all",
            waited_ms: 10,
        }
        .into();

        assert_eq!(validation.status_code(), 400);
        assert_eq!(validation.to_string(), "Name is required");
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(timeout.status_code(), 503);
        assert_eq!(timeout.kind(), ErrorKind::Store);
    }
}
