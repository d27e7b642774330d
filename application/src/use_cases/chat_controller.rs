//! Chat controller: drives one request/response cycle at a time.
//!
//! The controller owns the session and the [`ChatState`]. For every request
//! it feeds the reducer with the events coming off the session stream and
//! hands each resulting snapshot to a [`SnapshotObserver`], in order.
//!
//! `submit` takes `&mut self`, so two cycles can never overlap; the loading
//! flag inside the state additionally rejects a submission made while a
//! reply is still in flight.

use crate::ports::llm_gateway::{GatewayError, LlmSession};
use crate::ports::snapshot_observer::SnapshotObserver;
use medichat_domain::util::preview;
use medichat_domain::{
    ChatEvent, ChatState, Rejection, RequestPhase, Snapshot, StreamEvent, Transition,
};
use tracing::{debug, info, warn};

/// How a request cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reply settled on the accumulated text.
    Settled,
    /// The stream ended without text; the fallback message was shown.
    EmptyResponse,
    /// The request failed; the apology was shown.
    Failed,
    /// Nothing happened.
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Greeting,
    User,
}

/// Owns the session and the conversation state for one chat.
pub struct ChatController {
    session: Box<dyn LlmSession>,
    state: ChatState,
}

impl ChatController {
    pub fn new(session: Box<dyn LlmSession>) -> Self {
        Self {
            session,
            state: ChatState::new(),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Send the synthetic greeting. Only the bot reply is added.
    ///
    /// A failed greeting does not emit the apology snapshot: the caller
    /// turns the failure into an initialization error instead.
    pub async fn greet(&mut self, greeting: &str, observer: &dyn SnapshotObserver) -> SubmitOutcome {
        if let Transition::Ignored(reason) = self.state.apply(ChatEvent::GreetingRequested) {
            return SubmitOutcome::Rejected(reason);
        }
        observer.on_snapshot(&self.state.snapshot());
        self.stream_reply(greeting, RequestKind::Greeting, observer)
            .await
    }

    /// Submit user text and stream the reply into the conversation.
    ///
    /// Whitespace-only text, or a call made while a reply is in flight,
    /// is a no-op that emits nothing.
    pub async fn submit(&mut self, text: &str, observer: &dyn SnapshotObserver) -> SubmitOutcome {
        if let Transition::Ignored(reason) =
            self.state.apply(ChatEvent::Submitted(text.to_string()))
        {
            debug!(?reason, "Submission ignored");
            return SubmitOutcome::Rejected(reason);
        }
        info!(input = %preview(text, 80), "Submitting message");
        observer.on_snapshot(&self.state.snapshot());
        self.stream_reply(text, RequestKind::User, observer).await
    }

    async fn stream_reply(
        &mut self,
        prompt: &str,
        kind: RequestKind,
        observer: &dyn SnapshotObserver,
    ) -> SubmitOutcome {
        let mut handle = match self.session.send_streaming(prompt).await {
            Ok(handle) => handle,
            Err(e) => return self.fail(&e, kind, observer),
        };

        loop {
            match handle.next().await {
                Some(StreamEvent::Delta(fragment)) => {
                    let bytes = fragment.len();
                    if self.state.apply(ChatEvent::Fragment(fragment)).is_applied() {
                        debug!(bytes, "Fragment received");
                        observer.on_snapshot(&self.state.snapshot());
                    }
                }
                Some(StreamEvent::Completed) => break,
                Some(StreamEvent::Error(message)) => {
                    return self.fail(&GatewayError::RequestFailed(message), kind, observer);
                }
                None => return self.fail(&GatewayError::TransportClosed, kind, observer),
            }
        }

        let empty = self.state.phase() == RequestPhase::Placeholder;
        self.state.apply(ChatEvent::Exhausted);
        observer.on_snapshot(&self.state.snapshot());

        if empty {
            warn!(model = %self.session.model(), "Provider returned an empty response");
            SubmitOutcome::EmptyResponse
        } else {
            debug!(
                messages = self.state.conversation().len(),
                "Reply settled"
            );
            SubmitOutcome::Settled
        }
    }

    fn fail(
        &mut self,
        error: &GatewayError,
        kind: RequestKind,
        observer: &dyn SnapshotObserver,
    ) -> SubmitOutcome {
        warn!(?kind, "Message sending error: {}", error);
        self.state.apply(ChatEvent::Failed);
        if kind == RequestKind::User {
            observer.on_snapshot(&self.state.snapshot());
        }
        SubmitOutcome::Failed
    }
}
