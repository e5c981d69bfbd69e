//! Session persistence port
//!
//! The caller owns each session's [`SessionState`]; this port lets a
//! front end that does not live across requests (a one-shot CLI run, a
//! cookie-less client) keep it between invocations.

use guidance_domain::SessionState;
use thiserror::Error;

/// Errors raised by a [`SessionStore`] adapter
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Malformed session: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for saving and restoring one session between runs.
pub trait SessionStore: Send + Sync {
    /// Last saved session, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<SessionState>, SessionStoreError>;

    /// Replace the saved session with `session`
    fn save(&self, session: &SessionState) -> Result<(), SessionStoreError>;
}
