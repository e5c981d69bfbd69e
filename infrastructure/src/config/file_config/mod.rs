//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; domain types are parsed from them on
//! demand, with problems reported as [`ConfigIssue`]s.

mod corpus;
mod logging;
mod matching;
mod repl;
mod routing;

pub use corpus::FileCorpusConfig;
pub use logging::FileLoggingConfig;
pub use matching::FileMatchingConfig;
pub use repl::FileReplConfig;
pub use routing::FileRoutingConfig;

use guidance_application::DeskParams;
use guidance_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Corpus workbook location and partitions
    pub corpus: FileCorpusConfig,
    /// Fuzzy matching settings
    pub matching: FileMatchingConfig,
    /// Responders, fallback domain and unread persistence
    pub routing: FileRoutingConfig,
    /// Audit and diagnostic log files
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.corpus.validate());
        issues.extend(self.matching.parse_threshold().1);
        issues.extend(self.routing.parse_fallback_domain().1);
        issues.extend(self.routing.parse_responders().1);
        issues
    }

    /// Application parameters, with invalid values replaced by defaults.
    pub fn to_desk_params(&self) -> DeskParams {
        DeskParams::default()
            .with_threshold(self.matching.parse_threshold().0)
            .with_partitions(self.corpus.partitions.clone())
            .with_append_partition(self.corpus.append_partition.clone())
            .with_fallback_domain(self.routing.parse_fallback_domain().0)
    }
}
