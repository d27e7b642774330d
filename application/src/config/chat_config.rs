//! Chat session parameters.
//!
//! [`ChatConfig`] is what the session initializer hands to the gateway.
//! Every field is a build-time constant; nothing here is read from the
//! config file.

use medichat_domain::{GenerationParams, Model, Persona};

/// Parameters a chat session is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Model every request is sent to.
    pub model: Model,
    /// Assistant persona (system instruction and greeting).
    pub persona: Persona,
    /// Sampling parameters.
    pub generation: GenerationParams,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: Model::chat_default(),
            persona: Persona::healthcare(),
            generation: GenerationParams::CHAT,
        }
    }
}

impl ChatConfig {
    pub fn system_instruction(&self) -> &str {
        self.persona.system_instruction()
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }
}
