//! Events that can occur in a conversation

use crate::gateway::GatewayError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User pressed send or hit Enter. Both UI triggers route through this
    /// one event - there is no divergent keyboard path.
    Submit { text: String },

    /// The in-flight responder call resolved with a reply
    ReplyReady { text: String },

    /// The in-flight responder call failed
    ReplyFailed { error: GatewayError },
}
