//! Session orchestration: age gate, location, then chat or discovery.
//!
//! One [`Session`] holds every piece of transient state, and
//! [`SessionPhase`] is the only transition table. Both the chat flow and the
//! discovery flow run through [`SessionController`].

pub mod controller;
pub mod model;
pub mod sequence;
pub mod state;

pub use controller::SessionController;
pub use model::{CHAT_ERROR_MESSAGE, DISCOVERY_ERROR_MESSAGE, DiscoveryState, Session};
pub use sequence::{RequestSlot, SequenceTracker, Ticket};
pub use state::SessionPhase;
