//! Structured configuration issues.
//!
//! Config loaders report problems as [`ConfigIssue`]s instead of failing on
//! the first one, so every problem can be shown at once. Callers abort on
//! any [`Severity::Error`] and log warnings.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Similarity threshold outside `[0.0, 1.0]`.
    ThresholdOutOfRange,
    /// A domain name that is not one of the known domains.
    UnknownDomain { field: String, value: String },
    /// A responder name that is blank.
    EmptyResponder { domain: String },
    /// Two domains mapped to the same responder.
    DuplicateResponder { name: String },
    /// No corpus partitions configured.
    NoPartitions,
    /// The append partition is not one of the loaded partitions.
    AppendPartitionNotLoaded { partition: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether any issue in `issues` is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
