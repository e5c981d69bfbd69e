//! In-memory port fakes shared by use case tests.

use crate::ports::corpus_source::{CorpusSource, CorpusSourceError};
use crate::ports::interaction_logger::{InteractionEvent, InteractionLogger};
use crate::ports::unread_store::{UnreadStore, UnreadStoreError};
use guidance_domain::CorpusEntry;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Corpus source holding partitions in memory, with switchable write failure
#[derive(Default)]
pub struct MemoryCorpusSource {
    pub partitions: Mutex<BTreeMap<String, Vec<CorpusEntry>>>,
    pub fail_writes: AtomicBool,
}

impl MemoryCorpusSource {
    pub fn with_partition(name: &str, rows: &[(&str, &str)]) -> Self {
        let source = Self::default();
        source.partitions.lock().unwrap().insert(
            name.to_string(),
            rows.iter().map(|(q, a)| CorpusEntry::new(*q, *a)).collect(),
        );
        source
    }

    pub fn rows(&self, partition: &str) -> Vec<CorpusEntry> {
        self.partitions
            .lock()
            .unwrap()
            .get(partition)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CorpusSource for MemoryCorpusSource {
    fn load(&self, partitions: &[String]) -> Result<Vec<CorpusEntry>, CorpusSourceError> {
        let stored = self.partitions.lock().unwrap();
        let mut rows = Vec::new();
        for name in partitions {
            let partition = stored
                .get(name)
                .ok_or_else(|| CorpusSourceError::MissingPartition(name.clone()))?;
            rows.extend(partition.iter().cloned());
        }
        Ok(rows)
    }

    fn append(&self, partition: &str, entry: &CorpusEntry) -> Result<(), CorpusSourceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CorpusSourceError::Io("write refused".to_string()));
        }
        self.partitions
            .lock()
            .unwrap()
            .entry(partition.to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }
}

/// Unread store kept in memory, with switchable write failure
#[derive(Default)]
pub struct MemoryUnreadStore {
    pub saved: Mutex<Option<BTreeMap<String, u64>>>,
    pub saves: Mutex<usize>,
    pub fail_writes: AtomicBool,
}

impl MemoryUnreadStore {
    pub fn with_counts(counts: &[(&str, u64)]) -> Self {
        let store = Self::default();
        *store.saved.lock().unwrap() = Some(
            counts
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        );
        store
    }

    pub fn saved_count(&self, name: &str) -> Option<u64> {
        self.saved
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|m| m.get(name).copied())
    }

    pub fn save_calls(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl UnreadStore for MemoryUnreadStore {
    fn load(&self) -> Result<Option<BTreeMap<String, u64>>, UnreadStoreError> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, counts: &BTreeMap<String, u64>) -> Result<(), UnreadStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(UnreadStoreError::Io("write refused".to_string()));
        }
        *self.saved.lock().unwrap() = Some(counts.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// Logger that keeps event types for assertions
#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl InteractionLogger for RecordingLogger {
    fn log(&self, event: InteractionEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
