//! Streaming events for provider session communication.
//!
//! [`StreamEvent`] represents individual events in a streaming model
//! response, enabling display of the reply while it is generated.

/// An event in a streaming model response.
///
/// Bridges transport-level streaming (SSE chunks from the provider) to the
/// application layer. A well-formed stream is zero or more `Delta`s followed
/// by exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A non-empty text increment from the model.
    Delta(String),
    /// The reply is complete.
    Completed,
    /// The stream failed. Carries a diagnostic for the developer log only.
    Error(String),
}

impl StreamEvent {
    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
