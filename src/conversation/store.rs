//! Conversation store implementation
//!
//! A cheaply clonable handle around the single mutable conversation
//! aggregate. All mutations are synchronous and atomic under the lock, and
//! every mutation notifies subscribed observers.

use super::message::{Message, MessageId, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Fixed greeting seeded as the first message of every conversation.
pub const GREETING: &str = "Hello! I am Chameleon. Ask me about Sports, Finance, or Tech, \
    and I will adapt my brain to answer you.";

/// Capacity of the observer channel. Snapshots remain authoritative, so a
/// lagged observer can always resynchronize via `snapshot()`.
const OBSERVER_CHANNEL_CAPACITY: usize = 128;

/// Notifications sent to observers after each mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    MessageAppended { message: Message },
    BusyChanged { busy: bool },
}

/// Read-only copy of the conversation for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
}

/// The mutable conversation aggregate. Owned exclusively by the store;
/// `messages` is append-only and its first entry is always the greeting.
#[derive(Debug)]
struct Conversation {
    messages: Vec<Message>,
    busy: bool,
    next_id: u64,
}

impl Conversation {
    fn seeded() -> Self {
        let mut conv = Self {
            messages: Vec::new(),
            busy: false,
            next_id: 1,
        };
        let id = conv.allocate_id();
        conv.messages.push(Message::new(id, Sender::Agent, GREETING));
        conv
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Thread-safe handle to the conversation
///
/// This component never fails: blank input is a no-op and observer send
/// failures (no subscribers) are ignored.
#[derive(Clone)]
pub struct ConversationStore {
    conv: Arc<Mutex<Conversation>>,
    observers: broadcast::Sender<StoreEvent>,
}

impl ConversationStore {
    /// Create a store seeded with the greeting, `busy = false`
    #[must_use]
    pub fn new() -> Self {
        let (observers, _) = broadcast::channel(OBSERVER_CHANNEL_CAPACITY);
        Self {
            conv: Arc::new(Mutex::new(Conversation::seeded())),
            observers,
        }
    }

    /// Append a user message with a freshly allocated id.
    ///
    /// Blank or whitespace-only text mutates nothing and returns `None`.
    pub fn append_user_message(&self, text: &str) -> Option<Message> {
        self.append(Sender::User, text)
    }

    /// Append an agent message with a freshly allocated id.
    ///
    /// Used only for the seeded greeting and completed gateway calls.
    /// Blank text mutates nothing and returns `None`.
    pub fn append_agent_message(&self, text: &str) -> Option<Message> {
        self.append(Sender::Agent, text)
    }

    fn append(&self, sender: Sender, text: &str) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let message = {
            let mut conv = self.conv.lock().unwrap();
            let id = conv.allocate_id();
            let message = Message::new(id, sender, text);
            conv.messages.push(message.clone());
            message
        };

        let _ = self.observers.send(StoreEvent::MessageAppended {
            message: message.clone(),
        });
        Some(message)
    }

    /// Set the busy flag and notify observers
    pub fn set_busy(&self, busy: bool) {
        self.conv.lock().unwrap().busy = busy;
        let _ = self.observers.send(StoreEvent::BusyChanged { busy });
    }

    /// Current message sequence and busy flag as a defensive copy
    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        let conv = self.conv.lock().unwrap();
        ConversationSnapshot {
            messages: conv.messages.clone(),
            busy: conv.busy,
        }
    }

    /// Subscribe to mutation notifications
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.observers.subscribe()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
