//! Gemini generative-language REST adapter
//!
//! Implements the [`LlmGateway`](medichat_application::LlmGateway) port on top
//! of `models/{model}:streamGenerateContent` with server-sent events.
//!
//! The REST API is stateless, so [`GeminiSession`](session::GeminiSession)
//! keeps the conversation history itself and replays it on every request.

pub mod error;
pub mod gateway;
pub mod session;
pub mod sse;
pub mod types;
