//! Port for structured interaction logging.
//!
//! Defines the [`InteractionLogger`] trait for recording what happened to
//! each question (fixed reply, corpus match, routed, answered) as an
//! audit trail.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per event (e.g. JSONL).

use serde_json::Value;

/// A structured interaction event for logging.
pub struct InteractionEvent {
    /// Event type identifier (e.g., "corpus_match", "routed", "answered").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InteractionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging interaction events to a structured log.
///
/// The `log` method is synchronous and non-fallible; a failing audit log
/// never fails the question it describes.
pub trait InteractionLogger: Send + Sync {
    /// Record an interaction event.
    fn log(&self, event: InteractionEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoInteractionLogger;

impl InteractionLogger for NoInteractionLogger {
    fn log(&self, _event: InteractionEvent) {}
}
