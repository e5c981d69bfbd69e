//! Unread counts persisted as a flat JSON object.
//!
//! ```json
//! {"Dr Gohar": 0, "Dr Naeem": 2}
//! ```

use guidance_application::ports::unread_store::{UnreadStore, UnreadStoreError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Unread store backed by a JSON file.
///
/// A missing file means nothing was saved yet.
pub struct JsonUnreadStore {
    path: PathBuf,
}

impl JsonUnreadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UnreadStore for JsonUnreadStore {
    fn load(&self) -> Result<Option<BTreeMap<String, u64>>, UnreadStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(UnreadStoreError::Io(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| UnreadStoreError::Malformed(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, counts: &BTreeMap<String, u64>) -> Result<(), UnreadStoreError> {
        let content = serde_json::to_string_pretty(counts)
            .map_err(|e| UnreadStoreError::Malformed(e.to_string()))?;
        super::write_atomic(&self.path, &content)
            .map_err(|e| UnreadStoreError::Io(format!("{}: {}", self.path.display(), e)))
    }
}
