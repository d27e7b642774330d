//! Incremental parser for the `alt=sse` response stream.
//!
//! Gemini frames every chunk as `data: {json}` followed by a blank line.
//! Bytes are buffered raw so that a UTF-8 sequence split across network
//! reads is decoded only once the whole frame is in.

use super::types::{ApiErrorEnvelope, GenerateContentResponse};
use medichat_domain::util::preview;
use serde_json::Value;
use tracing::debug;

/// One decoded stream chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkEvent {
    /// Non-empty text for the reply.
    Text(String),
    /// The prompt was refused, with the provider's reason.
    Blocked(String),
    /// The provider reported an error mid-stream.
    Error { code: i64, message: String },
    /// The payload could not be understood.
    Malformed(String),
}

/// Incremental SSE frame parser
#[derive(Debug, Default)]
pub struct SseStreamParser {
    buffer: Vec<u8>,
}

impl SseStreamParser {
    /// Feed arbitrary bytes into the parser and drain complete events.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ChunkEvent> {
        self.buffer
            .extend(bytes.iter().copied().filter(|byte| *byte != b'\r'));

        let mut events = Vec::new();
        while let Some(split) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..split + 2).collect();
            let frame = String::from_utf8_lossy(&frame[..split]);
            events.extend(parse_frame(&frame));
        }
        events
    }

    /// Flush a final frame that arrived without its terminating blank line.
    pub fn finish(self) -> Vec<ChunkEvent> {
        let rest = String::from_utf8_lossy(&self.buffer);
        if rest.trim().is_empty() {
            Vec::new()
        } else {
            parse_frame(&rest).into_iter().collect()
        }
    }

    /// Parse a complete SSE payload string in one shot.
    pub fn parse_all(input: &str) -> Vec<ChunkEvent> {
        let mut parser = Self::default();
        let mut events = parser.feed(input.as_bytes());
        events.extend(parser.finish());
        events
    }
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

fn parse_frame(frame: &str) -> Option<ChunkEvent> {
    let payload = extract_data_payload(frame)?;
    if payload == "[DONE]" {
        return None;
    }

    let value: Value = match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(_) => return Some(ChunkEvent::Malformed(preview(&payload, 200).into_owned())),
    };

    if value.get("error").is_some() {
        return Some(match serde_json::from_value::<ApiErrorEnvelope>(value) {
            Ok(envelope) => ChunkEvent::Error {
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => ChunkEvent::Malformed(preview(&payload, 200).into_owned()),
        });
    }

    let response: GenerateContentResponse = match serde_json::from_value(value) {
        Ok(response) => response,
        Err(_) => return Some(ChunkEvent::Malformed(preview(&payload, 200).into_owned())),
    };

    let text = response.text();
    if !text.is_empty() {
        return Some(ChunkEvent::Text(text));
    }
    if let Some(reason) = response.block_reason() {
        return Some(ChunkEvent::Blocked(reason.to_string()));
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
    {
        debug!(finish_reason = reason, "Chunk without text");
    }
    None
}

fn extract_data_payload(frame: &str) -> Option<String> {
    let data_lines: Vec<&str> = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect();

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}
