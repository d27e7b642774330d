//! Scripted test doubles shared by the use case tests.

use crate::config::ChatConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle};
use crate::ports::snapshot_observer::SnapshotObserver;
use async_trait::async_trait;
use medichat_domain::{Model, Snapshot, StreamEvent};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted reply
pub(crate) enum Script {
    Stream(Vec<StreamEvent>),
    DispatchError,
}

impl Script {
    fn deltas(parts: &[&str]) -> Vec<StreamEvent> {
        parts
            .iter()
            .map(|p| StreamEvent::Delta(p.to_string()))
            .collect()
    }

    pub(crate) fn fragments(parts: &[&str]) -> Self {
        let mut events = Self::deltas(parts);
        events.push(StreamEvent::Completed);
        Script::Stream(events)
    }

    pub(crate) fn fragments_then_error(parts: &[&str], message: &str) -> Self {
        let mut events = Self::deltas(parts);
        events.push(StreamEvent::Error(message.to_string()));
        Script::Stream(events)
    }

    /// Deltas, then the producer goes away without a terminal event.
    pub(crate) fn truncated(parts: &[&str]) -> Self {
        Script::Stream(Self::deltas(parts))
    }

    pub(crate) fn dispatch_error() -> Self {
        Script::DispatchError
    }
}

pub(crate) struct ScriptedSession {
    model: Model,
    scripts: Mutex<VecDeque<Script>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSession {
    pub(crate) fn new(scripts: Vec<Script>) -> Self {
        Self {
            model: Model::chat_default(),
            scripts: Mutex::new(VecDeque::from(scripts)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, shared so tests can inspect them after the
    /// session has been moved into a controller.
    pub(crate) fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        self.prompts.lock().unwrap().push(content.to_string());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::RequestFailed("No more responses".to_string()))?;

        match script {
            Script::DispatchError => Err(GatewayError::ConnectionError(
                "provider unreachable".to_string(),
            )),
            Script::Stream(events) => {
                let (tx, handle) = StreamHandle::channel(events.len().max(1));
                for event in events {
                    tx.try_send(event).unwrap();
                }
                Ok(handle)
            }
        }
    }
}

pub(crate) struct ScriptedGateway {
    session: Mutex<Option<ScriptedSession>>,
    configs: Mutex<Vec<ChatConfig>>,
}

impl ScriptedGateway {
    pub(crate) fn new(session: ScriptedSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            configs: Mutex::new(Vec::new()),
        }
    }

    /// A gateway that has no session to hand out.
    pub(crate) fn without_credential() -> Self {
        Self {
            session: Mutex::new(None),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn configs(&self) -> Vec<ChatConfig> {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session(
        &self,
        config: &ChatConfig,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.configs.lock().unwrap().push(config.clone());
        let session = self
            .session
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| GatewayError::MissingCredential("API_KEY".to_string()))?;
        Ok(Box::new(session))
    }
}

/// Observer that keeps every snapshot it is handed.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    snapshots: Mutex<Vec<Snapshot>>,
}

impl RecordingObserver {
    pub(crate) fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<Snapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn trailing_display_texts(&self) -> Vec<String> {
        self.snapshots()
            .iter()
            .filter_map(|s| s.trailing().map(|m| m.display_text().into_owned()))
            .collect()
    }

    pub(crate) fn loading_flags(&self) -> Vec<bool> {
        self.snapshots().iter().map(|s| s.is_loading()).collect()
    }
}

impl SnapshotObserver for RecordingObserver {
    fn on_snapshot(&self, snapshot: &Snapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }
}
