//! Presentation layer for medichat
//!
//! This crate contains the CLI definition, the console formatter, the
//! streaming renderer that subscribes to conversation snapshots, and the
//! interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::renderer::StreamingRenderer;
