//! Desk parameters — static settings consumed by the use cases.
//!
//! [`DeskParams`] is built by the binary from the loaded file config and
//! handed to [`CorpusStore`](crate::use_cases::corpus_store::CorpusStore)
//! and [`HandleQueryUseCase`](crate::use_cases::handle_query::HandleQueryUseCase).

use guidance_domain::{DEFAULT_THRESHOLD, Domain};
use serde::{Deserialize, Serialize};

/// Parameters controlling matching and corpus partitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskParams {
    /// Minimum similarity ratio for a corpus match.
    pub threshold: f64,
    /// Partitions loaded into the corpus at startup, in load order.
    pub partitions: Vec<String>,
    /// Partition that receives answers written back by responders.
    pub append_partition: String,
    /// Domain used when no keyword matches.
    pub fallback_domain: Domain,
}

impl Default for DeskParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            partitions: vec![
                "Sheet1".to_string(),
                "Sheet2".to_string(),
                "Sheet3".to_string(),
            ],
            append_partition: "Sheet1".to_string(),
            fallback_domain: Domain::StudentAffairs,
        }
    }
}

impl DeskParams {
    // ==================== Builder Methods ====================

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_partitions(mut self, partitions: Vec<String>) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_append_partition(mut self, partition: impl Into<String>) -> Self {
        self.append_partition = partition.into();
        self
    }

    pub fn with_fallback_domain(mut self, domain: Domain) -> Self {
        self.fallback_domain = domain;
        self
    }
}
