//! Chameleon chat conversation core
//!
//! The client-side state machine behind a single-page chat UI: an owned
//! conversation store, a pure submission state machine, and a replaceable
//! async responder gateway (today a fixed-delay echo stub).
//!
//! The view layer is deliberately out of scope; it consumes
//! [`ChatSession::snapshot`] and [`ChatSession::subscribe`] and routes both
//! the send button and the Enter key through [`ChatSession::submit`].

pub mod conversation;
pub mod gateway;
pub mod runtime;
pub mod state_machine;

pub use conversation::{
    ConversationSnapshot, ConversationStore, Message, MessageId, Sender, StoreEvent,
};
pub use gateway::{GatewayError, GatewayErrorKind, Responder, StubResponder};
pub use runtime::ChatSession;
pub use state_machine::{transition, ChatState, Effect, Event, TransitionError, TransitionResult};
