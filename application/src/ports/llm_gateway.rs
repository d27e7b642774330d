//! LLM Gateway port
//!
//! Defines the interface for communicating with the generative-language
//! provider.

use crate::config::ChatConfig;
use async_trait::async_trait;
use medichat_domain::{Model, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API credential is missing or empty (expected in ${0})")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Transport closed")]
    TransportClosed,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the
/// provider. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a conversation session with the given model, persona and
    /// sampling parameters.
    async fn create_session(&self, config: &ChatConfig) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// Handle for receiving streaming events from an LLM session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. The producer side sends zero or
/// more `Delta`s and then one terminal event.
pub struct StreamHandle {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Create a bounded channel and the handle reading from it.
    pub fn channel(capacity: usize) -> (mpsc::Sender<StreamEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Wait for the next event. `None` means the producer went away.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// An active LLM session
///
/// The session owns the provider-side conversation context; each call
/// continues the same conversation.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a streaming response.
    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError>;
}
