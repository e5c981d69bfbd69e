//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Invalid responder directory: {0}")]
    InvalidDirectory(String),

    #[error("Invalid similarity threshold: {0}")]
    InvalidThreshold(String),
}

impl DomainError {
    /// Check if this error was caused by caller input rather than configuration
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::InvalidQuery(_))
    }
}
