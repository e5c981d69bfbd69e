//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// audit_file = "logs/interactions.jsonl"   # JSONL interaction audit trail
/// dir = "logs"                             # daily rolling diagnostic log
/// ```
///
/// Both are off when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub audit_file: Option<String>,
    pub dir: Option<String>,
}
