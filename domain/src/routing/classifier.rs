//! Keyword-based domain classification.
//!
//! Each domain is scored by the total number of (non-overlapping) substring
//! occurrences of its keywords in the lowercased query. The highest score
//! wins; ties go to the domain declared first in [`Domain::ALL`]; a query
//! that matches no keyword at all goes to the fallback domain.

use super::domain::Domain;
use super::responder::{Responder, ResponderDirectory};
use serde::{Deserialize, Serialize};

/// Per-domain keyword score for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: Domain,
    pub occurrences: usize,
}

/// Result of classifying a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub domain: Domain,
    pub responder: Responder,
    /// Score of the chosen domain; 0 when the fallback was used
    pub score: usize,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.score == 0
    }
}

/// Classifies unmatched queries into a [`Domain`] and its [`Responder`].
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    directory: ResponderDirectory,
    fallback: Domain,
}

impl DomainClassifier {
    pub fn new(directory: ResponderDirectory) -> Self {
        Self {
            directory,
            fallback: Domain::default(),
        }
    }

    /// Use a different fallback domain for queries with no keyword hit
    pub fn with_fallback(mut self, fallback: Domain) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn directory(&self) -> &ResponderDirectory {
        &self.directory
    }

    pub fn fallback(&self) -> Domain {
        self.fallback
    }

    /// Score every domain against `query`, in priority order.
    pub fn scores(&self, query: &str) -> Vec<DomainScore> {
        let query = query.to_lowercase();
        Domain::ALL
            .iter()
            .map(|&domain| DomainScore {
                domain,
                occurrences: domain
                    .keywords()
                    .iter()
                    .map(|kw| query.matches(kw).count())
                    .sum(),
            })
            .collect()
    }

    /// Pick the domain for `query`. Never fails.
    pub fn classify(&self, query: &str) -> Classification {
        let mut best: Option<DomainScore> = None;
        for score in self.scores(query) {
            // Strictly greater keeps the earlier domain on ties
            if score.occurrences > best.map_or(0, |b| b.occurrences) {
                best = Some(score);
            }
        }

        let (domain, score) = match best {
            Some(s) => (s.domain, s.occurrences),
            None => (self.fallback, 0),
        };

        Classification {
            domain,
            responder: self.directory.responder_for(domain).clone(),
            score,
        }
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(ResponderDirectory::default())
    }
}
