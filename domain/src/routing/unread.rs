//! Per-responder unread counters.
//!
//! Counts are reset to zero (not decremented) when a responder answers,
//! so the badge reflects "has unanswered questions" rather than a queue
//! length. Several questions routed to the same responder before one is
//! answered are all cleared by that single answer.

use super::responder::{Responder, ResponderDirectory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unread count for every configured responder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnreadState {
    counts: BTreeMap<String, u64>,
}

impl UnreadState {
    /// All configured responders at zero
    pub fn zeroed(directory: &ResponderDirectory) -> Self {
        Self {
            counts: directory
                .iter()
                .map(|(_, r)| (r.name().to_string(), 0))
                .collect(),
        }
    }

    /// Reconcile previously persisted counts with the current directory.
    ///
    /// Configured responders missing from `stored` start at zero. Returns
    /// the reconciled state and the names in `stored` that are not
    /// configured (they are dropped).
    pub fn reconcile(
        directory: &ResponderDirectory,
        stored: BTreeMap<String, u64>,
    ) -> (Self, Vec<String>) {
        let mut state = Self::zeroed(directory);
        let mut unknown = Vec::new();
        for (name, count) in stored {
            match state.counts.get_mut(&name) {
                Some(slot) => *slot = count,
                None => unknown.push(name),
            }
        }
        (state, unknown)
    }

    /// Count for `responder`; zero for names that are not tracked
    pub fn count(&self, responder: &Responder) -> u64 {
        self.count_by_name(responder.name())
    }

    pub fn count_by_name(&self, name: &str) -> u64 {
        self.counts.get(name.trim()).copied().unwrap_or(0)
    }

    /// Copy with `responder`'s count incremented by one
    pub fn incremented(&self, responder: &Responder) -> Self {
        let mut next = self.clone();
        let slot = next.counts.entry(responder.name().to_string()).or_insert(0);
        *slot = slot.saturating_add(1);
        next
    }

    /// Copy with `responder`'s count reset to zero
    pub fn reset(&self, responder: &Responder) -> Self {
        let mut next = self.clone();
        next.counts.insert(responder.name().to_string(), 0);
        next
    }

    /// Raw name → count mapping (for persistence)
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Total of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_covers_every_responder() {
        let dir = ResponderDirectory::default();
        let state = UnreadState::zeroed(&dir);
        assert_eq!(state.as_map().len(), 5);
        for (_, responder) in dir.iter() {
            assert_eq!(state.count(responder), 0);
        }
    }

    #[test]
    fn test_increment_and_reset_are_copies() {
        let dir = ResponderDirectory::default();
        let state = UnreadState::zeroed(&dir);
        let gohar = Responder::new("Dr Gohar");

        let once = state.incremented(&gohar);
        let twice = once.incremented(&gohar);
        assert_eq!(state.count(&gohar), 0);
        assert_eq!(once.count(&gohar), 1);
        assert_eq!(twice.count(&gohar), 2);

        let cleared = twice.reset(&gohar);
        assert_eq!(cleared.count(&gohar), 0);
        assert_eq!(cleared.total(), 0);
    }

    #[test]
    fn test_reconcile_fills_and_drops() {
        let dir = ResponderDirectory::default();
        let mut stored = BTreeMap::new();
        stored.insert("Dr Naeem".to_string(), 3);
        stored.insert("Former Staff".to_string(), 7);

        let (state, unknown) = UnreadState::reconcile(&dir, stored);
        assert_eq!(state.count_by_name("Dr Naeem"), 3);
        assert_eq!(state.count_by_name("Dr Gohar"), 0);
        assert_eq!(state.as_map().len(), 5);
        assert_eq!(unknown, vec!["Former Staff".to_string()]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let dir = ResponderDirectory::default();
        let state = UnreadState::zeroed(&dir).incremented(&Responder::new("Dr Asim Zeb"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["Dr Asim Zeb"], 1);
        assert_eq!(json["Teacher Kinza"], 0);
    }
}
