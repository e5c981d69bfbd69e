//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text
    Text,
    /// One JSON object per answer
    Json,
}

/// CLI arguments for guidance-desk
#[derive(Parser, Debug)]
#[command(name = "guidance-desk")]
#[command(author, version, about = "Student guidance desk - answers known questions, routes the rest")]
#[command(long_about = r#"
Guidance Desk answers student questions from a curated question/answer
corpus and routes anything it cannot answer to the responsible staff member.

A question goes through three steps:
1. Fixed replies: greetings and courtesy phrases
2. Corpus lookup: the most similar known question (similarity >= threshold)
3. Routing: keyword classification into a domain, queued for its responder

Answers given by responders are written back to the corpus.

Configuration files are loaded from (in priority order):
1. GUIDANCE_* environment variables (e.g. GUIDANCE_MATCHING__THRESHOLD=0.7)
2. --config <path>      Explicit config file
3. ./guidance.toml      Project-level config
4. ~/.config/guidance-desk/config.toml   Global config

Example:
  guidance-desk "What is the admission deadline?"
  guidance-desk --chat
  guidance-desk --responders
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive desk mode
    #[arg(short, long)]
    pub chat: bool,

    /// Show unread counts for every responder and exit
    #[arg(long)]
    pub responders: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress banners and hints
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
