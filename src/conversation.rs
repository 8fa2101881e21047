//! Conversation store
//!
//! Single source of truth for the message history and the busy flag.

mod message;
mod store;

pub use message::{Message, MessageId, Sender};
pub use store::{ConversationSnapshot, ConversationStore, StoreEvent, GREETING};
