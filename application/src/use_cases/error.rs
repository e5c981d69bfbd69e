//! Errors shared by the desk use cases.

use crate::ports::corpus_source::CorpusSourceError;
use crate::ports::unread_store::UnreadStoreError;
use guidance_domain::DomainError;
use thiserror::Error;

/// Errors returned by the query, routing and corpus use cases.
///
/// Input errors leave all state untouched. A corpus persistence error
/// means nothing was applied. An unread persistence error while answering
/// means the answer already reached the corpus but the responder's badge
/// was not reset; see [`DeskError::answer_was_recorded`].
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No pending question to answer")]
    NoPendingQuery,

    #[error("Failed to persist corpus: {0}")]
    CorpusPersistence(#[from] CorpusSourceError),

    #[error("Failed to persist unread counts: {0}")]
    UnreadPersistence(#[from] UnreadStoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DeskError {
    /// Caller supplied something unusable; nothing was changed
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DeskError::InvalidInput(_) | DeskError::NoPendingQuery)
    }

    /// A durable write failed; the caller may resubmit
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            DeskError::CorpusPersistence(_) | DeskError::UnreadPersistence(_)
        )
    }

    /// When returned by an answer: the corpus write went through and only
    /// the unread reset failed, so resubmitting will not add another row
    pub fn answer_was_recorded(&self) -> bool {
        matches!(self, DeskError::UnreadPersistence(_))
    }
}

impl From<DomainError> for DeskError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidQuery(msg) => DeskError::InvalidInput(msg),
            other => DeskError::Configuration(other.to_string()),
        }
    }
}
