//! Conversation domain.
//!
//! - [`entities::Conversation`] - ordered list of [`entities::Message`]s
//! - [`reducer::ChatState`] - folds request events into the conversation
//! - [`snapshot::Snapshot`] - render-ready view with derived display text

pub mod entities;
pub mod reducer;
pub mod snapshot;
