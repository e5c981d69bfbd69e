//! Corpus configuration from TOML (`[corpus]` section)

use guidance_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw corpus configuration from TOML
///
/// # Example
///
/// ```toml
/// [corpus]
/// path = "dataset.json"
/// partitions = ["Sheet1", "Sheet2", "Sheet3"]
/// append_partition = "Sheet1"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Path to the JSON workbook
    pub path: String,
    /// Partitions loaded at startup, in merge order
    pub partitions: Vec<String>,
    /// Partition that receives human answers
    pub append_partition: String,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            path: "dataset.json".to_string(),
            partitions: vec![
                "Sheet1".to_string(),
                "Sheet2".to_string(),
                "Sheet3".to_string(),
            ],
            append_partition: "Sheet1".to_string(),
        }
    }
}

impl FileCorpusConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.partitions.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoPartitions,
                "corpus.partitions: at least one partition must be listed",
            ));
        } else if !self.partitions.contains(&self.append_partition) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::AppendPartitionNotLoaded {
                    partition: self.append_partition.clone(),
                },
                format!(
                    "corpus.append_partition: '{}' is not loaded at startup; answers saved there are lost on restart",
                    self.append_partition
                ),
            ));
        }

        issues
    }
}
