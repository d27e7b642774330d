//! Interactive chat module
//!
//! Provides a reedline-based interactive chat with the assistant.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
