//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show the welcome banner
    pub show_banner: bool,
    /// Path to history file; `None` uses the platform data directory
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_banner: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file to use: the configured one, or
    /// `<data_dir>/guidance-desk/history.txt`.
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("guidance-desk").join("history.txt")))
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_history_file_wins() {
        let config = ReplConfig {
            history_file: Some(PathBuf::from("/tmp/desk-history.txt")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_history_file(),
            Some(PathBuf::from("/tmp/desk-history.txt"))
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("data/x.json"), PathBuf::from("data/x.json"));
        assert_eq!(expand_home("/abs/x.json"), PathBuf::from("/abs/x.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.json"), home.join("x.json"));
        }
    }
}
