//! Pending queries and the per-session routing state.
//!
//! # State Transitions
//!
//! ```text
//! Idle ──submit──> Pending ──answer──> Idle
//!                     └──submit──> Pending (previous query discarded)
//! ```
//!
//! The session value is owned by the caller (e.g. a cookie or a REPL
//! loop) and passed into every routing operation; nothing here is global.

use super::domain::Domain;
use super::responder::Responder;
use serde::{Deserialize, Serialize};

/// A question awaiting a human answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuery {
    /// Normalized question text, written to the corpus once answered
    pub question: String,
    pub domain: Domain,
    pub responder: Responder,
}

impl PendingQuery {
    pub fn new(question: impl Into<String>, domain: Domain, responder: Responder) -> Self {
        Self {
            question: question.into(),
            domain,
            responder,
        }
    }

    /// Whether this query is assigned to the responder called `name`
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.responder.name() == name.trim()
    }
}

/// Routing phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingPhase {
    Idle,
    Pending,
}

/// Per-session state carried between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// At most one question awaiting an answer
    pub pending: Option<PendingQuery>,
    /// Text most recently shown to the end user
    pub last_response: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoutingPhase {
        if self.pending.is_some() {
            RoutingPhase::Pending
        } else {
            RoutingPhase::Idle
        }
    }

    /// Enter (or stay in) Pending with `query`, returning any query it replaced.
    pub fn submit(&mut self, query: PendingQuery) -> Option<PendingQuery> {
        self.pending.replace(query)
    }

    /// Return to Idle after an answer, remembering it as the last response.
    pub fn resolve(&mut self, answer: impl Into<String>) -> Option<PendingQuery> {
        self.last_response = Some(answer.into());
        self.pending.take()
    }

    /// Record a bot reply without touching the pending query
    pub fn respond(&mut self, text: impl Into<String>) {
        self.last_response = Some(text.into());
    }
}
