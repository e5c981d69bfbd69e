//! Best approximate match of a query against known questions.

use super::similarity::QueryIndex;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default minimum similarity ratio for a match
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// A candidate accepted by the [`FuzzyMatcher`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub question: String,
    pub ratio: f64,
}

/// Picks the single most similar candidate at or above a threshold.
///
/// Ties at the best ratio resolve to the lexicographically greatest
/// candidate, so the result does not depend on iteration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DomainError::InvalidThreshold(format!(
                "{} is outside [0.0, 1.0]",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best candidate for `query`, or `None` if nothing reaches the threshold
    pub fn find_best<'a, I>(&self, query: &str, candidates: I) -> Option<FuzzyMatch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let index = QueryIndex::new(query);
        let mut best: Option<(&'a str, f64)> = None;

        for candidate in candidates {
            // Anything that cannot reach the threshold, or cannot at least
            // tie the current best, is skipped before the full comparison
            let floor = best.map_or(self.threshold, |(_, r)| r.max(self.threshold));
            if index.length_bound(candidate) < floor || index.histogram_bound(candidate) < floor
            {
                continue;
            }

            let ratio = index.ratio(candidate);
            if ratio < self.threshold {
                continue;
            }

            let better = match best {
                None => true,
                Some((current, best_ratio)) => {
                    ratio > best_ratio || (ratio == best_ratio && candidate > current)
                }
            };
            if better {
                best = Some((candidate, ratio));
            }
        }

        best.map(|(question, ratio)| FuzzyMatch {
            question: question.to_string(),
            ratio,
        })
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&str] = &[
        "What are the admission requirements?",
        "What is the admission deadline?",
        "How do I apply for a hostel room?",
    ];

    #[test]
    fn test_exact_question_matches_with_ratio_one() {
        let m = FuzzyMatcher::default()
            .find_best("What is the admission deadline?", CORPUS.iter().copied())
            .unwrap();
        assert_eq!(m.question, "What is the admission deadline?");
        assert_eq!(m.ratio, 1.0);
    }

    #[test]
    fn test_single_typo_still_matches() {
        let m = FuzzyMatcher::default()
            .find_best("what is the admision deadline?", CORPUS.iter().copied())
            .unwrap();
        assert_eq!(m.question, "What is the admission deadline?");
    }

    #[test]
    fn test_unrelated_query_has_no_match() {
        let m = FuzzyMatcher::default().find_best("zzzz qqqq", CORPUS.iter().copied());
        assert!(m.is_none());
    }

    #[test]
    fn test_heavily_misspelled_query_picks_closest() {
        // 0.83 against requirements, exactly 0.6 against deadline
        let m = FuzzyMatcher::default()
            .find_best("what r d admision requiremnts", CORPUS.iter().copied())
            .unwrap();
        assert_eq!(m.question, "What are the admission requirements?");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let candidates = ["What is the admission deadline?"];
        let matcher = FuzzyMatcher::default();
        let m = matcher
            .find_best("what r d admision requiremnts", candidates)
            .unwrap();
        assert_eq!(m.ratio, 0.6);

        let strict = FuzzyMatcher::new(0.61).unwrap();
        assert!(
            strict
                .find_best("what r d admision requiremnts", candidates)
                .is_none()
        );
    }

    #[test]
    fn test_ties_pick_greatest_candidate_in_any_order() {
        let matcher = FuzzyMatcher::default();
        let forward = matcher.find_best("abcd", ["abce", "abcf"]).unwrap();
        let backward = matcher.find_best("abcd", ["abcf", "abce"]).unwrap();
        assert_eq!(forward.question, "abcf");
        assert_eq!(backward.question, "abcf");
        assert_eq!(forward.ratio, 0.75);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(FuzzyMatcher::default().find_best("anything", Vec::<&str>::new()).is_none());
    }

    #[test]
    fn test_threshold_validation() {
        assert!(FuzzyMatcher::new(0.0).is_ok());
        assert!(FuzzyMatcher::new(1.0).is_ok());
        assert!(FuzzyMatcher::new(1.5).is_err());
        assert!(FuzzyMatcher::new(-0.1).is_err());
        assert!(FuzzyMatcher::new(f64::NAN).is_err());
    }
}
