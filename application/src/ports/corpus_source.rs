//! Corpus source port
//!
//! Defines the interface for the tabular store that backs the corpus.
//! The store is organized in named partitions (e.g. spreadsheet sheets),
//! each holding (question, answer) rows.

use guidance_domain::CorpusEntry;
use thiserror::Error;

/// Errors raised by a [`CorpusSource`] adapter
#[derive(Error, Debug)]
pub enum CorpusSourceError {
    #[error("Corpus source not found: {0}")]
    NotFound(String),

    #[error("Partition not found: {0}")]
    MissingPartition(String),

    #[error("Malformed corpus data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for reading and extending the backing corpus table.
///
/// Implementations (adapters) live in the infrastructure layer.
pub trait CorpusSource: Send + Sync {
    /// Read every usable row from `partitions`, in partition order.
    ///
    /// Rows without a question or answer, or with a blank question, are
    /// skipped. A partition that does not exist is an error.
    fn load(&self, partitions: &[String]) -> Result<Vec<CorpusEntry>, CorpusSourceError>;

    /// Append `entry` as a new row of `partition` and durably rewrite it.
    ///
    /// Must not return `Ok` until the write is durable.
    fn append(&self, partition: &str, entry: &CorpusEntry) -> Result<(), CorpusSourceError>;
}
