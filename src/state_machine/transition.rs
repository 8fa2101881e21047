//! Pure state transition function

use super::{ChatState, Effect, Event};
use crate::gateway::GatewayError;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition.
///
/// `EmptySubmission` and `ResponderBusy` are rejected submissions: the
/// runtime treats them as silent no-ops (the store is never touched).
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Blank submission ignored")]
    EmptySubmission,
    #[error("A response is already in flight, submission rejected")]
    ResponderBusy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O
/// side effects. Effect order encodes the required store ordering: the user
/// message is appended before the responder call is issued, and a resolution
/// always resets busy.
///
/// # Errors
///
/// Returns [`TransitionError::EmptySubmission`] for blank submissions,
/// [`TransitionError::ResponderBusy`] for submissions while a call is in
/// flight, and [`TransitionError::InvalidTransition`] for resolutions that
/// arrive with no call outstanding.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit (non-blank) -> Awaiting
        (ChatState::Idle, Event::Submit { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptySubmission);
            }

            Ok(TransitionResult::new(ChatState::Awaiting {
                prompt: text.to_string(),
            })
            .with_effect(Effect::AppendUserMessage {
                text: text.to_string(),
            })
            .with_effect(Effect::SetBusy { busy: true })
            .with_effect(Effect::CallResponder {
                prompt: text.to_string(),
            }))
        }

        // Awaiting + Submit -> rejected (backpressure: one call in flight)
        (ChatState::Awaiting { .. }, Event::Submit { .. }) => Err(TransitionError::ResponderBusy),

        // Awaiting + ReplyReady -> Idle
        (ChatState::Awaiting { .. }, Event::ReplyReady { text }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::AppendAgentMessage { text })
                .with_effect(Effect::SetBusy { busy: false }))
        }

        // Awaiting + ReplyFailed -> Idle with a visible failure notice
        (ChatState::Awaiting { .. }, Event::ReplyFailed { error }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::SetBusy { busy: false })
                .with_effect(Effect::AppendAgentMessage {
                    text: failure_notice(&error),
                }))
        }

        // Resolutions with no call outstanding cannot occur while the
        // single-in-flight invariant holds; the runtime logs and drops them.
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}

/// Agent-sender text shown when a gateway call fails, so the user is never
/// left staring at a silent stall.
fn failure_notice(error: &GatewayError) -> String {
    format!("I could not fetch a response: {error}. Please try again.")
}
