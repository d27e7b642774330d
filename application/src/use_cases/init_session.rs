//! Init Session use case.
//!
//! Creates the one chat session for this process and asks the model for its
//! welcome message. Any failure here is terminal: no controller is returned,
//! so no message can ever be submitted.

use crate::config::ChatConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::snapshot_observer::SnapshotObserver;
use crate::use_cases::chat_controller::{ChatController, SubmitOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that end the chat before it starts.
///
/// The `Display` text is meant for the user; the underlying cause goes to
/// the developer log.
#[derive(Error, Debug)]
pub enum InitSessionError {
    #[error("Failed to initialize AI. Please check if the API key is configured correctly.")]
    Session(#[source] GatewayError),

    #[error("An error occurred while starting the chat session. Please try again later.")]
    Greeting,
}

/// Use case for starting the chat.
pub struct InitSessionUseCase {
    gateway: Arc<dyn LlmGateway>,
    config: ChatConfig,
}

impl InitSessionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            config: ChatConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    /// Create the session and stream the greeting reply.
    pub async fn execute(
        &self,
        observer: &dyn SnapshotObserver,
    ) -> Result<ChatController, InitSessionError> {
        info!(model = %self.config.model, "Creating chat session");

        let session = self
            .gateway
            .create_session(&self.config)
            .await
            .map_err(|e| {
                error!("Failed to create chat session: {}", e);
                InitSessionError::Session(e)
            })?;

        let mut controller = ChatController::new(session);
        match controller
            .greet(self.config.persona.greeting(), observer)
            .await
        {
            SubmitOutcome::Failed => {
                error!("Initialization error: greeting request failed");
                Err(InitSessionError::Greeting)
            }
            outcome => {
                info!(?outcome, "Chat session ready");
                Ok(controller)
            }
        }
    }
}
