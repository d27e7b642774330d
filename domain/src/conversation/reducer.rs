//! Stream reducer: folds one request's events into the conversation.
//!
//! Each request runs placeholder → accumulating → settled. A failure at any
//! point replaces the reply with [`APOLOGY_MESSAGE`]; a stream that ends
//! without a single fragment settles on [`EMPTY_RESPONSE_MESSAGE`].

use super::entities::{Conversation, Message};
use super::snapshot::{DisplayMessage, RequestPhase, Snapshot};
use crate::core::user_input::UserInput;

/// Reply shown when a request fails, whatever the cause.
pub const APOLOGY_MESSAGE: &str = "Sorry, I couldn't process that. Please try again.";

/// Reply shown when the stream ends without producing any text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "I received an empty response. Could you try rephrasing?";

/// Input to the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The user submitted text. It is shown verbatim.
    Submitted(String),
    /// The synthetic greeting was sent. Only the bot placeholder is shown.
    GreetingRequested,
    /// One streamed text increment.
    Fragment(String),
    /// The fragment sequence ended normally.
    Exhausted,
    /// The request failed.
    Failed,
}

/// Why an event left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A request is already in flight.
    RequestInFlight,
    /// The submitted text was blank.
    EmptyInput,
    /// A stream event arrived with nothing in flight.
    NoRequestInFlight,
    /// A fragment carried no text.
    EmptyFragment,
}

/// Outcome of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(Rejection),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InFlight {
    accumulated: String,
    fragments: usize,
}

/// Conversation plus the request in flight, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    conversation: Conversation,
    in_flight: Option<InFlight>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The loading flag.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> RequestPhase {
        match &self.in_flight {
            None => RequestPhase::Idle,
            Some(pending) if pending.fragments == 0 => RequestPhase::Placeholder,
            Some(_) => RequestPhase::Accumulating,
        }
    }

    /// Apply one event in place.
    pub fn apply(&mut self, event: ChatEvent) -> Transition {
        match event {
            ChatEvent::Submitted(text) => {
                if self.is_loading() {
                    return Transition::Ignored(Rejection::RequestInFlight);
                }
                let Ok(input) = UserInput::parse(text) else {
                    return Transition::Ignored(Rejection::EmptyInput);
                };
                self.conversation.push(Message::user(input.into_content()));
                self.open_placeholder();
                Transition::Applied
            }
            ChatEvent::GreetingRequested => {
                if self.is_loading() {
                    return Transition::Ignored(Rejection::RequestInFlight);
                }
                self.open_placeholder();
                Transition::Applied
            }
            ChatEvent::Fragment(fragment) => {
                let Some(pending) = self.in_flight.as_mut() else {
                    return Transition::Ignored(Rejection::NoRequestInFlight);
                };
                if fragment.is_empty() {
                    return Transition::Ignored(Rejection::EmptyFragment);
                }
                pending.accumulated.push_str(&fragment);
                pending.fragments += 1;
                let text = pending.accumulated.clone();
                self.conversation.replace_trailing_bot(text);
                Transition::Applied
            }
            ChatEvent::Exhausted => {
                let Some(pending) = self.in_flight.take() else {
                    return Transition::Ignored(Rejection::NoRequestInFlight);
                };
                let text = if pending.accumulated.is_empty() {
                    EMPTY_RESPONSE_MESSAGE.to_string()
                } else {
                    pending.accumulated
                };
                self.conversation.replace_trailing_bot(text);
                Transition::Applied
            }
            ChatEvent::Failed => {
                if self.in_flight.take().is_none() {
                    return Transition::Ignored(Rejection::NoRequestInFlight);
                }
                self.conversation.replace_trailing_bot(APOLOGY_MESSAGE);
                Transition::Applied
            }
        }
    }

    /// Render-ready view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let last = self.conversation.len().saturating_sub(1);
        let streaming = self.is_loading();
        let messages = self
            .conversation
            .messages()
            .iter()
            .enumerate()
            .map(|(index, message)| DisplayMessage {
                author: message.author,
                text: message.text.clone(),
                settled: !(streaming && index == last),
            })
            .collect();
        Snapshot::new(messages, self.phase())
    }

    fn open_placeholder(&mut self) {
        self.conversation.push(Message::bot(""));
        self.in_flight = Some(InFlight::default());
    }
}

/// Pure form of [`ChatState::apply`].
pub fn reduce(mut state: ChatState, event: ChatEvent) -> ChatState {
    state.apply(event);
    state
}
