//! Domain layer for guidance-desk
//!
//! This crate contains the matching and routing logic. It has no
//! dependencies on storage, configuration files or presentation.
//!
//! # Core Concepts
//!
//! ## Answering
//!
//! An incoming [`Query`] is answered, in order, by:
//!
//! - **Fixed responses**: exact greeting/courtesy phrases ([`FixedResponses`])
//! - **Fuzzy corpus lookup**: the most similar known question at or above a
//!   threshold ([`FuzzyMatcher`], [`Corpus`])
//!
//! ## Routing
//!
//! Anything left unanswered is classified into a [`Domain`] by keyword
//! scoring ([`DomainClassifier`]) and handed to that domain's [`Responder`]
//! as a [`PendingQuery`]. Responders see per-name [`UnreadState`] badges.

pub mod config;
pub mod core;
pub mod corpus;
pub mod matching;
pub mod routing;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, query::Query, string::truncate};
pub use corpus::entities::{Corpus, CorpusEntry, CorpusHit};
pub use matching::{
    fixed::FixedResponses,
    fuzzy::{DEFAULT_THRESHOLD, FuzzyMatch, FuzzyMatcher},
    similarity::{QueryIndex, ratio},
};
pub use routing::{
    classifier::{Classification, DomainClassifier, DomainScore},
    domain::Domain,
    pending::{PendingQuery, RoutingPhase, SessionState},
    responder::{Responder, ResponderDirectory},
    unread::UnreadState,
};
