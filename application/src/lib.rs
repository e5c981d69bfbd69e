//! Application layer for guidance-desk
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeskParams;
pub use ports::{
    corpus_source::{CorpusSource, CorpusSourceError},
    interaction_logger::{InteractionEvent, InteractionLogger, NoInteractionLogger},
    session_store::{SessionStore, SessionStoreError},
    unread_store::{UnreadStore, UnreadStoreError},
};
pub use use_cases::corpus_store::CorpusStore;
pub use use_cases::error::DeskError;
pub use use_cases::handle_query::{HandleQueryUseCase, QueryOutcome};
pub use use_cases::routing::{ResponderBadge, RoutingStateMachine};
