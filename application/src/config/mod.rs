//! Application-level configuration.
//!
//! - [`ChatConfig`] - model, persona and sampling parameters for a chat session

pub mod chat_config;

pub use chat_config::ChatConfig;
