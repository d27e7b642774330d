//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Input is empty or whitespace only")]
    EmptyInput,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}
