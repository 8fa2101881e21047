//! Submission orchestration state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `(state, event) -> (new state, effects)`. The runtime executes the
//! effects; this module performs no I/O.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::ChatState;
pub use transition::{transition, TransitionError, TransitionResult};
