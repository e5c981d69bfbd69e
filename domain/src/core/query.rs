//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A normalized question submitted by an end user (Value Object)
///
/// Normalization trims surrounding whitespace and lowercases the text.
/// Every lookup (fixed responses, corpus matching, classification) and
/// the pending question that is eventually written back to the corpus
/// use this normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    text: String,
}

impl Query {
    /// Normalize raw input, rejecting blank text
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let text = normalize(raw);
        if text.is_empty() {
            Err(DomainError::InvalidQuery("query is empty".to_string()))
        } else {
            Ok(Self { text })
        }
    }

    /// Normalized text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Trim surrounding whitespace and lowercase
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
