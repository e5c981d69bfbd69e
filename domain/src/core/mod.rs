//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] — a normalized, non-empty incoming question
//! - [`error::DomainError`] — domain-level errors
//! - [`string`] — small text helpers used for log previews

pub mod error;
pub mod query;
pub mod string;
