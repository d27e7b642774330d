//! Application layer for medichat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatConfig;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    snapshot_observer::{NoSnapshotObserver, SnapshotObserver},
};
pub use use_cases::chat_controller::{ChatController, SubmitOutcome};
pub use use_cases::init_session::{InitSessionError, InitSessionUseCase};
