//! Provider session domain.
//!
//! - [`stream::StreamEvent`] - one event of a streamed model reply

pub mod stream;
