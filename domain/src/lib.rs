//! Domain layer for medichat
//!
//! This crate contains the conversation model and the stream reducer that
//! folds a streamed assistant reply into render-ready snapshots.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An ordered, append-only list of [`Message`]s. Only the trailing bot
//! message may change, and only while a reply is streaming.
//!
//! ## Stream Reducer
//!
//! [`ChatState::apply`] is a pure fold of [`ChatEvent`]s. Each request moves
//! through placeholder → accumulating → settled (or errored), and every
//! accepted event yields a [`Snapshot`] for the rendering layer.

pub mod config;
pub mod conversation;
pub mod core;
pub mod persona;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::generation::GenerationParams;
pub use conversation::{
    entities::{Author, Conversation, Message},
    reducer::{
        APOLOGY_MESSAGE, ChatEvent, ChatState, EMPTY_RESPONSE_MESSAGE, Rejection, Transition, reduce,
    },
    snapshot::{DisplayMessage, RequestPhase, Snapshot, TYPING_MARKER},
};
pub use core::{error::DomainError, model::Model, user_input::UserInput};
pub use persona::Persona;
pub use session::stream::StreamEvent;
