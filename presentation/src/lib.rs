//! Presentation layer for guidance-desk
//!
//! This crate contains CLI definitions, output formatters
//! and the interactive desk interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::{DeskRepl, ReplStep};
pub use cli::commands::{Cli, OutputFormat};
pub use config::{ReplConfig, expand_home};
pub use output::console::ConsoleFormatter;
