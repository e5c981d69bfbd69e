//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod corpus_store;
pub mod error;
pub mod handle_query;
pub mod routing;

#[cfg(test)]
pub(crate) mod test_support;
