//! Console output
//!
//! - [`console::ConsoleFormatter`] - static text: banner, help, history, errors
//! - [`renderer::StreamingRenderer`] - draws snapshots while a reply streams

pub mod console;
pub mod renderer;
