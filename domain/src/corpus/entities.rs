//! Corpus entities

use crate::matching::fuzzy::{FuzzyMatch, FuzzyMatcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One known question with its approved answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub question: String,
    pub answer: String,
}

impl CorpusEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An answer found through fuzzy lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusHit {
    /// The stored question that matched
    pub question: String,
    pub answer: String,
    pub ratio: f64,
}

/// Mapping from question text to answer text.
///
/// Keys are unique; inserting an existing question replaces its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: HashMap<String, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous answer if `question` existed
    pub fn insert(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(question.into(), answer.into())
    }

    pub fn lookup_exact(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(String::as_str)
    }

    pub fn contains(&self, question: &str) -> bool {
        self.entries.contains_key(question)
    }

    /// Current question keys (unordered)
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest stored question to `query` and its answer
    pub fn find_best(&self, matcher: &FuzzyMatcher, query: &str) -> Option<CorpusHit> {
        let FuzzyMatch { question, ratio } = matcher.find_best(query, self.questions())?;
        let answer = self.entries.get(&question)?.clone();
        Some(CorpusHit {
            question,
            answer,
            ratio,
        })
    }
}

impl FromIterator<CorpusEntry> for Corpus {
    fn from_iter<T: IntoIterator<Item = CorpusEntry>>(iter: T) -> Self {
        let mut corpus = Corpus::new();
        for entry in iter {
            corpus.insert(entry.question, entry.answer);
        }
        corpus
    }
}

impl Extend<CorpusEntry> for Corpus {
    fn extend<T: IntoIterator<Item = CorpusEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.insert(entry.question, entry.answer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Corpus {
        [
            CorpusEntry::new(
                "What are the admission requirements?",
                "See the admissions page.",
            ),
            CorpusEntry::new("When does the semester start?", "In September."),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_later_duplicate_overwrites() {
        let corpus: Corpus = [
            CorpusEntry::new("q", "first"),
            CorpusEntry::new("q", "second"),
        ]
        .into_iter()
        .collect();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.lookup_exact("q"), Some("second"));
    }

    #[test]
    fn test_insert_twice_keeps_one_entry() {
        let mut corpus = Corpus::new();
        assert!(corpus.insert("q", "a").is_none());
        assert_eq!(corpus.insert("q", "a"), Some("a".to_string()));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.lookup_exact("q"), Some("a"));
    }

    #[test]
    fn test_find_best_returns_answer() {
        let hit = sample()
            .find_best(&FuzzyMatcher::default(), "what r d admision requiremnts")
            .unwrap();
        assert_eq!(hit.answer, "See the admissions page.");
        assert_eq!(hit.question, "What are the admission requirements?");
    }

    #[test]
    fn test_every_key_matches_itself() {
        let corpus = sample();
        let matcher = FuzzyMatcher::default();
        for question in corpus.questions() {
            let hit = corpus.find_best(&matcher, question).unwrap();
            assert_eq!(hit.answer, corpus.lookup_exact(question).unwrap());
            assert_eq!(hit.ratio, 1.0);
        }
    }

    #[test]
    fn test_find_best_on_empty_corpus() {
        assert!(Corpus::new().find_best(&FuzzyMatcher::default(), "hi").is_none());
    }
}
