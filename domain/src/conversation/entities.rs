//! Conversation domain entities

use serde::{Deserialize, Serialize};

/// Author of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.author == Author::Bot
    }
}

/// Ordered conversation (Entity)
///
/// Append-only. The single exception is [`Conversation::replace_trailing_bot`],
/// which the reducer uses to update the reply that is still streaming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Overwrite the text of the trailing bot message.
    ///
    /// Returns `false` (and changes nothing) when the conversation does not
    /// end with a bot message.
    pub(crate) fn replace_trailing_bot(&mut self, text: impl Into<String>) -> bool {
        match self.messages.last_mut() {
            Some(message) if message.is_bot() => {
                message.text = text.into();
                true
            }
            _ => false,
        }
    }
}
