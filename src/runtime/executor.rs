//! Session runtime executor

use crate::conversation::ConversationStore;
use crate::gateway::Responder;
use crate::state_machine::{transition, ChatState, Effect, Event, TransitionError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Event loop for one chat session
///
/// The sole mutator of the store: events arrive on a channel, each is run
/// through the pure transition function, and the resulting effects are
/// executed in order. The responder call is the only suspension point and is
/// spawned as a background task whose resolution re-enters the loop as an
/// event.
pub struct SessionRuntime<R: Responder + 'static> {
    store: ConversationStore,
    state: ChatState,
    responder: Arc<R>,
    event_rx: mpsc::Receiver<Event>,
    // Weak so the runtime's own re-entry path never keeps the channel
    // open: once every session handle is dropped, recv() returns None
    // and the loop ends.
    event_tx: mpsc::WeakSender<Event>,
}

impl<R: Responder + 'static> SessionRuntime<R> {
    pub fn new(
        store: ConversationStore,
        responder: R,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            store,
            state: ChatState::Idle,
            responder: Arc::new(responder),
            event_rx,
            event_tx: event_tx.downgrade(),
        }
    }

    /// Process events until every session handle is dropped
    pub async fn run(mut self) {
        tracing::debug!("Starting session runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::debug!("Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(TransitionError::EmptySubmission) => {
                tracing::debug!("Ignoring blank submission");
                return;
            }
            Err(TransitionError::ResponderBusy) => {
                tracing::debug!("Ignoring submission while a response is in flight");
                return;
            }
            Err(e @ TransitionError::InvalidTransition(_)) => {
                tracing::warn!(error = %e, "Dropping event");
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::AppendUserMessage { text } => {
                // Transition already rejected blank text, so this appends.
                if let Some(msg) = self.store.append_user_message(&text) {
                    tracing::debug!(id = %msg.id, "Appended user message");
                }
            }

            Effect::AppendAgentMessage { text } => {
                if let Some(msg) = self.store.append_agent_message(&text) {
                    tracing::debug!(id = %msg.id, "Appended agent message");
                }
            }

            Effect::SetBusy { busy } => {
                self.store.set_busy(busy);
            }

            Effect::CallResponder { prompt } => {
                let responder = Arc::clone(&self.responder);
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::debug!("Calling responder (background)");

                    let event = match responder.respond(&prompt).await {
                        Ok(text) => Event::ReplyReady { text },
                        Err(error) => Event::ReplyFailed { error },
                    };

                    // Upgrade fails when the session was dropped mid-flight.
                    if let Some(event_tx) = event_tx.upgrade() {
                        let _ = event_tx.send(event).await;
                    }
                });
            }
        }
    }
}
