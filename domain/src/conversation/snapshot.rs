//! Render-ready view of the conversation.
//!
//! The typing marker is never stored in a [`Message`](super::entities::Message).
//! It is derived here, from whether the message is still streaming, so no
//! failure path can leave it behind.

use super::entities::Author;
use std::borrow::Cow;

/// Suffix drawn after a reply that is still streaming.
pub const TYPING_MARKER: &str = "...";

/// Phase of the request currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// No request in flight.
    Idle,
    /// Request dispatched, no fragment received yet.
    Placeholder,
    /// At least one fragment received.
    Accumulating,
}

impl RequestPhase {
    pub fn is_loading(&self) -> bool {
        !matches!(self, RequestPhase::Idle)
    }
}

/// A message as the rendering layer should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub author: Author,
    /// Stored text, without any marker.
    pub text: String,
    /// `false` only for the trailing bot reply while it streams.
    pub settled: bool,
}

impl DisplayMessage {
    /// Text to draw: the stored text, plus the typing marker while streaming.
    pub fn display_text(&self) -> Cow<'_, str> {
        if self.settled {
            Cow::Borrowed(&self.text)
        } else {
            Cow::Owned(format!("{}{}", self.text, TYPING_MARKER))
        }
    }
}

/// Immutable view of the conversation after one reducer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    messages: Vec<DisplayMessage>,
    phase: RequestPhase,
}

impl Snapshot {
    pub(crate) fn new(messages: Vec<DisplayMessage>, phase: RequestPhase) -> Self {
        Self { messages, phase }
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// The loading flag: true while a request awaits data.
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn trailing(&self) -> Option<&DisplayMessage> {
        self.messages.last()
    }
}
