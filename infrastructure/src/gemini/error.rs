//! Error types for the Gemini adapter

use medichat_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Failed to parse stream chunk: {0}")]
    Malformed(String),
}

impl From<GeminiError> for GatewayError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::Http(e) if e.is_connect() || e.is_timeout() => {
                GatewayError::ConnectionError(e.to_string())
            }
            GeminiError::Malformed(raw) => GatewayError::MalformedResponse(raw),
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}
