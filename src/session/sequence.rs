//! Per-slot request sequencing. A response is applied only if its ticket is
//! still the latest one issued for its slot.

use std::collections::HashMap;

/// Logical request slots that can race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    Chat,
    Discovery,
    Location,
    Predictions,
}

impl std::fmt::Display for RequestSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Discovery => write!(f, "discovery"),
            Self::Location => write!(f, "location"),
            Self::Predictions => write!(f, "predictions"),
        }
    }
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: RequestSlot,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct SequenceTracker {
    latest: HashMap<RequestSlot, u64>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one for `slot`.
    pub fn issue(&mut self, slot: RequestSlot) -> Ticket {
        let seq = self.latest.entry(slot).or_insert(0);
        *seq += 1;
        Ticket { slot, seq: *seq }
    }

    /// Supersede outstanding tickets without issuing a usable one.
    pub fn invalidate(&mut self, slot: RequestSlot) {
        *self.latest.entry(slot).or_insert(0) += 1;
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.slot).copied() == Some(ticket.seq)
    }
}
