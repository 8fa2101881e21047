//! Effects produced by state transitions

/// Effects to be executed by the runtime after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a user message to the store
    AppendUserMessage { text: String },

    /// Append an agent message to the store (reply or failure notice)
    AppendAgentMessage { text: String },

    /// Set the store's busy flag
    SetBusy { busy: bool },

    /// Invoke the responder gateway (spawns as background task)
    CallResponder { prompt: String },
}
