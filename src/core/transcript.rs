//! Append-only store of chat messages.
//!
//! The transcript is display state only: it is never sent to the API. Each
//! completion request carries just the latest user line, so messages exist
//! purely so the renderer can project them.

use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// A single chat entry. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Opaque identity, unique for the lifetime of the process. Only used
    /// for list-rendering stability.
    pub id: Uuid,
    pub text: String,
    pub author: Author,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author: Author::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author: Author::Assistant,
        }
    }
}

/// Ordered, append-only sequence of messages. Insertion order is the
/// display order; nothing is ever updated or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// A transcript seeded with the assistant greeting shown on launch.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut transcript = Self::new();
        transcript.push(Message::assistant(greeting));
        transcript
    }

    /// Appends a message. The only write operation the store has.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
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
}
