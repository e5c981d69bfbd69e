//! A single session kept in a JSON file between runs.
//!
//! ```json
//! {
//!   "pending": {"question": "visa rules", "domain": "Migration", "responder": "Dr Asim Zeb"},
//!   "last_response": "Your question was forwarded to Dr Asim Zeb."
//! }
//! ```

use guidance_application::ports::session_store::{SessionStore, SessionStoreError};
use guidance_domain::SessionState;
use std::path::{Path, PathBuf};

/// Session store backed by a JSON file.
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<SessionState>, SessionStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SessionStoreError::Io(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionStoreError::Malformed(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::Malformed(e.to_string()))?;
        super::write_atomic(&self.path, &content)
            .map_err(|e| SessionStoreError::Io(format!("{}: {}", self.path.display(), e)))
    }
}
