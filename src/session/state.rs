//! Session phase machine — the single transition table for every flow.

use serde::{Deserialize, Serialize};

/// Phases of a session.
///
/// Progresses linearly: AwaitingAge → AwaitingLocation → Ready. Ready is
/// terminal; changing location later does not leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    AwaitingAge,
    AwaitingLocation,
    Ready,
}

impl SessionPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (AwaitingAge, AwaitingLocation) | (AwaitingLocation, Ready)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn next(&self) -> Option<SessionPhase> {
        use SessionPhase::*;
        match self {
            AwaitingAge => Some(AwaitingLocation),
            AwaitingLocation => Some(Ready),
            Ready => None,
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::AwaitingAge
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AwaitingAge => "awaiting_age",
            Self::AwaitingLocation => "awaiting_location",
            Self::Ready => "ready",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use SessionPhase::*;
        assert!(AwaitingAge.can_transition_to(AwaitingLocation));
        assert!(AwaitingLocation.can_transition_to(Ready));
    }

    #[test]
    fn invalid_transitions() {
        use SessionPhase::*;
        // Skip
        assert!(!AwaitingAge.can_transition_to(Ready));
        // Backward
        assert!(!Ready.can_transition_to(AwaitingLocation));
        assert!(!AwaitingLocation.can_transition_to(AwaitingAge));
        // Self
        assert!(!Ready.can_transition_to(Ready));
    }

    #[test]
    fn next_walks_all_phases() {
        let mut current = SessionPhase::default();
        assert_eq!(current, SessionPhase::AwaitingAge);
        for expected in [SessionPhase::AwaitingLocation, SessionPhase::Ready] {
            let next = current.next().unwrap();
            assert_eq!(next, expected);
            current = next;
        }
        assert!(current.is_terminal());
        assert!(current.next().is_none());
    }

    #[test]
    fn display_matches_serde() {
        use SessionPhase::*;
        for phase in [AwaitingAge, AwaitingLocation, Ready] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{phase}\""), json);
        }
    }
}
