//! Routing of unmatched questions to human responders.
//!
//! - [`domain::Domain`] — the fixed set of topical domains
//! - [`responder::ResponderDirectory`] — static domain → responder mapping
//! - [`classifier::DomainClassifier`] — keyword scoring with deterministic tie-break
//! - [`pending::SessionState`] — per-session Idle/Pending state
//! - [`unread::UnreadState`] — per-responder unread badges

pub mod classifier;
pub mod domain;
pub mod pending;
pub mod responder;
pub mod unread;
