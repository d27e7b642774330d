//! Model value object representing a generative model

use super::error::DomainError;

/// Generative model identifier (Value Object)
///
/// The client talks to exactly one model, fixed at build time.
/// `Custom` exists so adapters and tests can address other deployments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    #[default]
    Gemini25Flash,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Custom(s) => s,
        }
    }

    /// The model every chat session is created with
    pub fn chat_default() -> Model {
        Model::Gemini25Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(DomainError::InvalidModel(s.to_string())),
            "gemini-2.5-flash" => Ok(Model::Gemini25Flash),
            other => Ok(Model::Custom(other.to_string())),
        }
    }
}
