//! Message types

use serde::{Deserialize, Serialize};

/// Unique message identifier.
///
/// Allocated from a monotonic counter owned by the store, so ids stay
/// collision-free even when two messages are created within the same clock
/// tick (the source UI derived ids from wall-clock time and papered over
/// collisions with a `+ 1` offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message (closed set - no third party)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Agent,
}

/// A single chat message, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    /// Classification label reserved for future topic-routing display.
    /// Always `None` until the classifier backend is connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Message {
    pub(crate) fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            category: None,
        }
    }

    /// Check if this message came from the user
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
