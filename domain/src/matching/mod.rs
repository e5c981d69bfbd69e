//! Answering from known text: fixed phrases first, then fuzzy corpus lookup.

pub mod fixed;
pub mod fuzzy;
pub mod similarity;
