//! Configuration file loading for guidance-desk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GUIDANCE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./guidance.toml` or `./.guidance.toml`
//! 4. Global: `$XDG_CONFIG_HOME/guidance-desk/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCorpusConfig, FileLoggingConfig, FileMatchingConfig, FileReplConfig,
    FileRoutingConfig,
};
pub use loader::ConfigLoader;
