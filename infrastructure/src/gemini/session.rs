//! Gemini chat session.
//!
//! Provides [`GeminiSession`] which implements [`LlmSession`] on top of the
//! stateless `streamGenerateContent` endpoint. Each request carries the
//! full history, and a turn joins the history only once its reply has
//! streamed through successfully.

use super::error::{GeminiError, Result};
use super::sse::{ChunkEvent, SseStreamParser};
use super::types::{ApiErrorEnvelope, Content, GenerateContentRequest, GenerationConfig};
use async_trait::async_trait;
use futures::StreamExt;
use medichat_application::{ChatConfig, GatewayError, LlmSession, StreamHandle};
use medichat_domain::util::preview;
use medichat_domain::{Model, StreamEvent};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";
const STREAM_BUFFER: usize = 32;

/// An active conversation with one Gemini model.
pub struct GeminiSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: Model,
    system_instruction: Content,
    generation_config: GenerationConfig,
    history: Arc<Mutex<Vec<Content>>>,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: config.model.clone(),
            system_instruction: Content::text(config.system_instruction()),
            generation_config: config.generation.into(),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of turns (user and model) the provider will see as context.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    async fn dispatch(&self, content: &str) -> Result<reqwest::Response> {
        let mut contents = self.history.lock().await.clone();
        contents.push(Content::user(content));

        let request = GenerateContentRequest {
            contents,
            system_instruction: self.system_instruction.clone(),
            generation_config: self.generation_config,
        };

        debug!(
            model = %self.model,
            turns = request.contents.len(),
            "Sending to Gemini: {}",
            preview(content, 80)
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| preview(&body, 200).into_owned());
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_streaming(&self, content: &str) -> std::result::Result<StreamHandle, GatewayError> {
        let response = self.dispatch(content).await.map_err(|e| {
            warn!("Gemini request failed: {}", e);
            GatewayError::from(e)
        })?;

        let (tx, handle) = StreamHandle::channel(STREAM_BUFFER);
        tokio::spawn(pump_stream(
            response,
            tx,
            Arc::clone(&self.history),
            content.to_string(),
        ));
        Ok(handle)
    }
}

/// Forward the response body to the handle, then record the turn.
async fn pump_stream(
    response: reqwest::Response,
    tx: mpsc::Sender<StreamEvent>,
    history: Arc<Mutex<Vec<Content>>>,
    prompt: String,
) {
    match read_stream(response, &tx).await {
        Ok(reply) => {
            if reply.is_empty() {
                debug!("Gemini stream ended without text");
            } else {
                let mut history = history.lock().await;
                history.push(Content::user(prompt));
                history.push(Content::model(reply));
                info!(turns = history.len(), "Gemini reply complete");
            }
            let _ = tx.send(StreamEvent::Completed).await;
        }
        Err(e) => {
            warn!("Gemini stream failed: {}", e);
            let _ = tx.send(StreamEvent::Error(e.to_string())).await;
        }
    }
}

async fn read_stream(response: reqwest::Response, tx: &mpsc::Sender<StreamEvent>) -> Result<String> {
    let mut parser = SseStreamParser::default();
    let mut reply = String::new();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for event in parser.feed(&chunk) {
            forward(event, tx, &mut reply).await?;
        }
    }
    for event in parser.finish() {
        forward(event, tx, &mut reply).await?;
    }
    Ok(reply)
}

async fn forward(event: ChunkEvent, tx: &mpsc::Sender<StreamEvent>, reply: &mut String) -> Result<()> {
    match event {
        ChunkEvent::Text(text) => {
            reply.push_str(&text);
            if tx.send(StreamEvent::Delta(text)).await.is_err() {
                debug!("Stream receiver dropped");
            }
            Ok(())
        }
        ChunkEvent::Blocked(reason) => Err(GeminiError::Blocked(reason)),
        ChunkEvent::Error { code, message } => Err(GeminiError::Api { code, message }),
        ChunkEvent::Malformed(raw) => Err(GeminiError::Malformed(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    struct CapturedRequest {
        head: String,
        body: Value,
    }

    struct CannedResponse {
        status: &'static str,
        content_type: &'static str,
        body: String,
    }

    impl CannedResponse {
        fn sse(frames: &[&str]) -> Self {
            let body = frames
                .iter()
                .map(|frame| format!("data: {}\r\n\r\n", frame))
                .collect();
            Self {
                status: "200 OK",
                content_type: "text/event-stream",
                body,
            }
        }

        fn error(status: &'static str, body: &str) -> Self {
            Self {
                status,
                content_type: "application/json",
                body: body.to_string(),
            }
        }
    }

    fn text_chunk(text: &str) -> String {
        serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    /// Serve each canned response on its own connection, in order.
    async fn serve(responses: Vec<CannedResponse>) -> (String, JoinHandle<Vec<CapturedRequest>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let mut captured = Vec::new();
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                captured.push(read_request(&mut socket).await);

                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.content_type,
                    response.body.len(),
                    response.body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            captured
        });

        let endpoint = format!(
            "http://{}/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse",
            addr
        );
        (endpoint, server)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed mid-body");
            buffer.extend_from_slice(&chunk[..n]);
        }

        let body = serde_json::from_slice(&buffer[header_end..header_end + content_length]).unwrap();
        CapturedRequest { head, body }
    }

    fn session_for(endpoint: &str) -> GeminiSession {
        GeminiSession::new(reqwest::Client::new(), endpoint, "test-key", &ChatConfig::default())
    }

    async fn collect(mut handle: StreamHandle) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.next().await {
            let terminal = event.is_terminal();
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_streams_deltas_then_completed() {
        let (endpoint, server) = serve(vec![CannedResponse::sse(&[
            text_chunk("Hel").as_str(),
            text_chunk("lo").as_str(),
        ])])
        .await;
        let session = session_for(&endpoint);

        let handle = session.send_streaming("Hi there").await.unwrap();
        let events = collect(handle).await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hel".to_string()),
                StreamEvent::Delta("lo".to_string()),
                StreamEvent::Completed,
            ]
        );

        let captured = server.await.unwrap();
        let request = &captured[0];
        assert!(request.head.starts_with("POST /v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"));
        assert!(request.head.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert_eq!(request.body["contents"][0]["role"], "user");
        assert_eq!(request.body["contents"][0]["parts"][0]["text"], "Hi there");
        assert!(
            request.body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("MediPal")
        );
        assert_eq!(request.body["generationConfig"]["topK"], 40);
    }

    #[tokio::test]
    async fn test_history_is_replayed_on_next_request() {
        let (endpoint, server) = serve(vec![
            CannedResponse::sse(&[text_chunk("Hi! How can I help?").as_str()]),
            CannedResponse::sse(&[text_chunk("Drink water.").as_str()]),
        ])
        .await;
        let session = session_for(&endpoint);

        collect(session.send_streaming("Hello").await.unwrap()).await;
        assert_eq!(session.history_len().await, 2);
        collect(session.send_streaming("Any tips?").await.unwrap()).await;

        let captured = server.await.unwrap();
        let contents = captured[1].body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["parts"][0]["text"], "Hello");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "Hi! How can I help?");
        assert_eq!(contents[2]["parts"][0]["text"], "Any tips?");
        assert_eq!(session.history_len().await, 4);
    }

    #[tokio::test]
    async fn test_in_stream_error_terminates_and_skips_history() {
        let error = r#"{"error": {"code": 500, "message": "internal", "status": "INTERNAL"}}"#;
        let (endpoint, server) =
            serve(vec![CannedResponse::sse(&[text_chunk("Hel").as_str(), error])]).await;
        let session = session_for(&endpoint);

        let events = collect(session.send_streaming("Hi").await.unwrap()).await;
        server.await.unwrap();

        assert_eq!(events[0], StreamEvent::Delta("Hel".to_string()));
        assert!(matches!(events.last(), Some(StreamEvent::Error(m)) if m.contains("internal")));
        assert_eq!(session.history_len().await, 0);
    }

    #[tokio::test]
    async fn test_empty_reply_completes_without_history() {
        let (endpoint, server) = serve(vec![CannedResponse::sse(&[text_chunk("").as_str()])]).await;
        let session = session_for(&endpoint);

        let events = collect(session.send_streaming("Hi").await.unwrap()).await;
        server.await.unwrap();

        assert_eq!(events, vec![StreamEvent::Completed]);
        assert_eq!(session.history_len().await, 0);
    }

    #[tokio::test]
    async fn test_http_error_status_fails_dispatch() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let (endpoint, server) =
            serve(vec![CannedResponse::error("400 Bad Request", body)]).await;
        let session = session_for(&endpoint);

        let err = session.send_streaming("Hi").await.err().unwrap();
        server.await.unwrap();

        assert!(
            matches!(err, GatewayError::RequestFailed(ref m) if m == "HTTP 400: API key not valid.")
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let session = session_for(&format!("http://{}/v1beta/models/x:streamGenerateContent", addr));
        let err = session.send_streaming("Hi").await.err().unwrap();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }
}
