//! Matching configuration from TOML (`[matching]` section)

use guidance_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Raw matching configuration from TOML
///
/// ```toml
/// [matching]
/// threshold = 0.6   # minimum similarity ratio, inclusive
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMatchingConfig {
    pub threshold: f64,
}

impl Default for FileMatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FileMatchingConfig {
    /// Threshold to use, with an error if the configured one is unusable.
    pub fn parse_threshold(&self) -> (f64, Vec<ConfigIssue>) {
        if (0.0..=1.0).contains(&self.threshold) {
            (self.threshold, vec![])
        } else {
            let issue = ConfigIssue::error(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "matching.threshold: {} is outside 0.0..=1.0",
                    self.threshold
                ),
            );
            (DEFAULT_THRESHOLD, vec![issue])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let (threshold, issues) = FileMatchingConfig::default().parse_threshold();
        assert_eq!(threshold, 0.6);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_bounds_are_accepted() {
        for threshold in [0.0, 1.0] {
            let config = FileMatchingConfig { threshold };
            assert!(config.parse_threshold().1.is_empty());
        }
    }

    #[test]
    fn test_out_of_range_is_error() {
        for threshold in [-0.1, 1.01, f64::NAN] {
            let config = FileMatchingConfig { threshold };
            let (value, issues) = config.parse_threshold();
            assert_eq!(value, DEFAULT_THRESHOLD);
            assert!(ConfigIssue::has_errors(&issues));
        }
    }
}
