//! Unread-count persistence port

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by an [`UnreadStore`] adapter
#[derive(Error, Debug)]
pub enum UnreadStoreError {
    #[error("Malformed unread state: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for the durable responder-name → unread-count mapping.
pub trait UnreadStore: Send + Sync {
    /// Previously saved counts, or `None` on first run
    fn load(&self) -> Result<Option<BTreeMap<String, u64>>, UnreadStoreError>;

    /// Replace the saved counts with `counts`
    fn save(&self, counts: &BTreeMap<String, u64>) -> Result<(), UnreadStoreError>;
}
