//! Interactive desk module
//!
//! Provides a line-editor based REPL where end users ask questions and
//! responders pick up and answer routed ones.

mod repl;

pub use repl::{DeskRepl, ReplStep};
