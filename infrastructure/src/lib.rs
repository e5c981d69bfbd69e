//! Infrastructure layer for guidance-desk
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCorpusConfig, FileLoggingConfig, FileMatchingConfig,
    FileReplConfig, FileRoutingConfig,
};
pub use logging::JsonlInteractionLogger;
pub use storage::{JsonSessionStore, JsonUnreadStore, JsonWorkbookSource, WorkbookError};
