//! JSONL audit trail of desk interactions.
//!
//! Each [`InteractionEvent`] becomes one line:
//!
//! ```json
//! {"timestamp":"2026-01-05T09:30:00.120Z","event":"routed","details":{"responder":"Dr Naeem","unread":1}}
//! ```
//!
//! The file is opened in append mode so the trail survives restarts, and
//! every record is written with a single `write_all` so concurrent events
//! never interleave within a line.

use guidance_application::ports::interaction_logger::{InteractionEvent, InteractionLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// One line of the audit trail
#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    event: &'a str,
    details: &'a serde_json::Value,
}

/// Interaction logger appending one JSON record per line to a file.
pub struct JsonlInteractionLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlInteractionLogger {
    /// Open (or create) the audit file, creating parent directories.
    ///
    /// Returns `None` with a warning if the file cannot be opened; the desk
    /// then runs without an audit trail.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create audit log directory {}: {}", parent.display(), e);
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InteractionLogger for JsonlInteractionLogger {
    fn log(&self, event: InteractionEvent) {
        let record = AuditRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event: event.event_type,
            details: &event.payload,
        };

        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not serialize '{}' audit record: {}", event.event_type, e);
                return;
            }
        };
        line.push(b'\n');

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(&line) {
            warn!("Could not write to audit log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit").join("desk.jsonl");
        let logger = JsonlInteractionLogger::new(&path).unwrap();

        logger.log(InteractionEvent::new(
            "corpus_match",
            serde_json::json!({
                "question": "what r d admision requiremnts",
                "matched": "What are the admission requirements?",
                "ratio": 0.83,
            }),
        ));
        logger.log(InteractionEvent::new(
            "routed",
            serde_json::json!({ "responder": "Dr Naeem", "unread": 1 }),
        ));

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["event"], "corpus_match");
        assert_eq!(
            records[0]["details"]["matched"],
            "What are the admission requirements?"
        );
        assert_eq!(records[1]["event"], "routed");
        assert_eq!(records[1]["details"]["unread"], 1);
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.jsonl");
        let logger = JsonlInteractionLogger::new(&path).unwrap();
        logger.log(InteractionEvent::new("fixed_response", serde_json::json!("hi")));

        let records = read_lines(&path);
        let timestamp = records[0]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
        assert_eq!(records[0]["details"], "hi");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.jsonl");

        for n in 0..2 {
            let logger = JsonlInteractionLogger::new(&path).unwrap();
            logger.log(InteractionEvent::new(
                "answered",
                serde_json::json!({ "run": n }),
            ));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["details"]["run"], 1);
    }

    #[test]
    fn test_concurrent_events_stay_on_their_own_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.jsonl");
        let logger = JsonlInteractionLogger::new(&path).unwrap();

        std::thread::scope(|scope| {
            for t in 0..4 {
                let logger = &logger;
                scope.spawn(move || {
                    for n in 0..25 {
                        logger.log(InteractionEvent::new(
                            "routed",
                            serde_json::json!({ "thread": t, "n": n }),
                        ));
                    }
                });
            }
        });

        assert_eq!(read_lines(&path).len(), 100);
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlInteractionLogger::new(dir.path()).is_none());
    }
}
