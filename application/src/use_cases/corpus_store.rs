//! Corpus store — the in-memory corpus and its durable backing table.
//!
//! Loaded once at startup from the configured partitions. Appends go to a
//! single partition and are persist-then-commit: the backing table is
//! rewritten first and the in-memory map only changes once that write
//! succeeded.

use crate::config::DeskParams;
use crate::ports::corpus_source::CorpusSource;
use crate::use_cases::error::DeskError;
use guidance_domain::{Corpus, CorpusEntry, CorpusHit, FuzzyMatcher, truncate};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Process-wide question → answer store.
pub struct CorpusStore {
    source: Arc<dyn CorpusSource>,
    append_partition: String,
    corpus: RwLock<Corpus>,
    /// Serializes appends so backing-table rewrites never interleave
    write_lock: Mutex<()>,
}

impl CorpusStore {
    /// Load the configured partitions from `source`.
    ///
    /// Later rows overwrite earlier rows with the same question, across
    /// partitions in the order they are listed.
    pub fn load(source: Arc<dyn CorpusSource>, params: &DeskParams) -> Result<Self, DeskError> {
        let rows = source.load(&params.partitions)?;
        let row_count = rows.len();
        let corpus: Corpus = rows.into_iter().collect();

        info!(
            "Loaded corpus: {} questions from {} rows in {} partition(s)",
            corpus.len(),
            row_count,
            params.partitions.len()
        );

        Ok(Self {
            source,
            append_partition: params.append_partition.clone(),
            corpus: RwLock::new(corpus),
            write_lock: Mutex::new(()),
        })
    }

    /// Stored answer for exactly `question`
    pub fn lookup_exact(&self, question: &str) -> Option<String> {
        self.read().lookup_exact(question).map(str::to_string)
    }

    /// Snapshot of the current question keys
    pub fn all_questions(&self) -> Vec<String> {
        self.read().questions().map(str::to_string).collect()
    }

    /// Closest stored question to `query`, if it reaches the matcher's threshold
    pub fn find_best(&self, matcher: &FuzzyMatcher, query: &str) -> Option<CorpusHit> {
        let hit = self.read().find_best(matcher, query);
        if let Some(hit) = &hit {
            debug!(
                "Corpus match {:.3} for '{}' -> '{}'",
                hit.ratio, query, hit.question
            );
        }
        hit
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Durably add `question` → `answer`, then make it visible in memory.
    ///
    /// An existing question has its answer replaced in memory. The backing
    /// partition always receives a new row; it is not deduplicated.
    pub fn append(&self, question: &str, answer: &str) -> Result<(), DeskError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.read().contains(question) {
            warn!(
                "Question already in corpus; appending a duplicate row to '{}': {}",
                self.append_partition,
                truncate(question, 80)
            );
        }

        let entry = CorpusEntry::new(question, answer);
        self.source.append(&self.append_partition, &entry)?;

        self.corpus
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry.question, entry.answer);

        info!("Appended answer to corpus partition '{}'", self.append_partition);
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Corpus> {
        self.corpus.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::corpus_source::CorpusSourceError;
    use crate::use_cases::test_support::MemoryCorpusSource;

    fn params(partitions: &[&str]) -> DeskParams {
        DeskParams::default()
            .with_partitions(partitions.iter().map(|p| p.to_string()).collect())
            .with_append_partition(partitions[0])
    }

    fn store_with(rows: &[(&str, &str)]) -> (Arc<MemoryCorpusSource>, CorpusStore) {
        let source = Arc::new(MemoryCorpusSource::with_partition("Sheet1", rows));
        let store = CorpusStore::load(source.clone(), &params(&["Sheet1"])).unwrap();
        (source, store)
    }

    #[test]
    fn test_load_merges_partitions_later_wins() {
        let source = MemoryCorpusSource::with_partition("Sheet1", &[("q1", "a1"), ("q2", "old")]);
        source
            .partitions
            .lock()
            .unwrap()
            .insert("Sheet2".to_string(), vec![CorpusEntry::new("q2", "new")]);

        let store = CorpusStore::load(Arc::new(source), &params(&["Sheet1", "Sheet2"])).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup_exact("q2").as_deref(), Some("new"));
    }

    #[test]
    fn test_load_missing_partition_fails() {
        let source = Arc::new(MemoryCorpusSource::with_partition("Sheet1", &[]));
        let result = CorpusStore::load(source, &params(&["Sheet1", "Sheet9"]));
        assert!(matches!(
            result,
            Err(DeskError::CorpusPersistence(CorpusSourceError::MissingPartition(_)))
        ));
    }

    #[test]
    fn test_append_persists_then_exposes() {
        let (source, store) = store_with(&[]);
        store.append("how do i pay fees", "At the bank.").unwrap();

        assert_eq!(
            store.lookup_exact("how do i pay fees").as_deref(),
            Some("At the bank.")
        );
        assert_eq!(source.rows("Sheet1").len(), 1);
        assert_eq!(store.all_questions(), vec!["how do i pay fees".to_string()]);
    }

    #[test]
    fn test_append_same_pair_twice_keeps_one_key_but_two_rows() {
        let (source, store) = store_with(&[]);
        store.append("q", "a").unwrap();
        store.append("q", "a").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup_exact("q").as_deref(), Some("a"));
        // The backing partition is not deduplicated
        assert_eq!(source.rows("Sheet1").len(), 2);
    }

    #[test]
    fn test_failed_append_leaves_memory_unchanged() {
        let (source, store) = store_with(&[("q", "old")]);
        source.set_fail_writes(true);

        let err = store.append("q", "new").unwrap_err();
        assert!(err.is_persistence_failure());
        assert_eq!(store.lookup_exact("q").as_deref(), Some("old"));

        let err = store.append("fresh", "x").unwrap_err();
        assert!(err.is_persistence_failure());
        assert!(store.lookup_exact("fresh").is_none());
    }

    #[test]
    fn test_appended_question_is_fuzzy_matchable() {
        let (_, store) = store_with(&[]);
        let matcher = FuzzyMatcher::default();
        assert!(store.find_best(&matcher, "where is the library").is_none());

        store
            .append("where is the library", "Next to block C.")
            .unwrap();
        let hit = store.find_best(&matcher, "where is the library").unwrap();
        assert_eq!(hit.answer, "Next to block C.");
    }
}
