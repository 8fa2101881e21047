//! Conversation state types

use serde::{Deserialize, Serialize};

/// Submission state
///
/// `Idle` and `Awaiting` cycle for the life of the session; there is no
/// terminal state. `busy` in the store mirrors `Awaiting` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input, no call in flight
    #[default]
    Idle,

    /// Exactly one responder call outstanding
    Awaiting {
        /// The trimmed user text the call was issued for
        prompt: String,
    },
}

impl ChatState {
    /// Check if a responder call is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, ChatState::Awaiting { .. })
    }
}
