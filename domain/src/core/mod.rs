//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - the generative model a session talks to
//! - [`user_input::UserInput`] - validated text submitted by the user
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod user_input;
