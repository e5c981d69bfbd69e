//! Application-level configuration.
//!
//! - [`DeskParams`] — matching threshold, corpus partitions and routing fallback

pub mod desk_params;

pub use desk_params::DeskParams;
