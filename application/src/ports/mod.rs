//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod corpus_source;
pub mod interaction_logger;
pub mod session_store;
pub mod unread_store;
