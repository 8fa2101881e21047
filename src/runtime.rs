//! Runtime for driving a chat session
//!
//! Owns the event loop that connects the view, the store, and the responder
//! gateway. The view talks to [`ChatSession`]; the loop itself lives in
//! [`SessionRuntime`].

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::conversation::{ConversationSnapshot, ConversationStore, StoreEvent};
use crate::gateway::Responder;
use crate::state_machine::Event;
use tokio::sync::{broadcast, mpsc};

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// View-facing handle to a running chat session
///
/// Cheap to clone. Dropping every handle closes the event channel, which
/// ends the runtime task.
#[derive(Clone)]
pub struct ChatSession {
    store: ConversationStore,
    event_tx: mpsc::Sender<Event>,
}

impl ChatSession {
    /// Seed a conversation and spawn its runtime with the given responder
    #[must_use]
    pub fn start<R: Responder + 'static>(responder: R) -> Self {
        let store = ConversationStore::new();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let runtime = SessionRuntime::new(store.clone(), responder, event_rx, event_tx.clone());
        tokio::spawn(runtime.run());

        Self { store, event_tx }
    }

    /// Submit user input
    ///
    /// The send button and the Enter key both route through this single
    /// entry point. Blank input and input submitted while a response is in
    /// flight are dropped by the state machine without touching the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session runtime has already stopped.
    pub async fn submit(&self, text: &str) -> Result<(), String> {
        self.event_tx
            .send(Event::Submit {
                text: text.to_string(),
            })
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Read-only copy of the conversation for rendering
    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.store.snapshot()
    }

    /// Subscribe to store mutations (a view re-renders and auto-scrolls on
    /// each notification)
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }
}
