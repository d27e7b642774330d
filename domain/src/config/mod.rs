//! Build-time configuration constants consumed by the chat core.

pub mod generation;
