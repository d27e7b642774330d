//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_controller;
pub mod init_session;

#[cfg(test)]
pub(crate) mod test_support;
