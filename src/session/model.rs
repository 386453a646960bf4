//! In-memory session state shared by the chat and discovery flows.
//!
//! All mutations are synchronous; the async work lives in
//! [`SessionController`](super::SessionController). Requests are split into a
//! `begin_*` step that validates preconditions and issues a ticket, and a
//! `complete_*` step that applies the response only while the ticket is
//! current.

use crate::api::{ChatRequest, DiscoverRequest, RawPlace, normalize_places};
use crate::error::{ApiError, SessionError};
use crate::location::PlacePrediction;
use crate::model::{
    AgeBracket, AgeInfo, ChatMessage, Location, Service, ServiceCategory, Transcript,
    WELCOME_MESSAGE,
};

use super::sequence::{RequestSlot, SequenceTracker, Ticket};
use super::state::SessionPhase;

/// Shown when a chat turn fails.
pub const CHAT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
/// Shown when a discovery query fails.
pub const DISCOVERY_ERROR_MESSAGE: &str = "Unable to load nearby services. Please try again.";

/// Where the discovery result area stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DiscoveryState {
    /// No search since the last location change.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Service>),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    phase: SessionPhase,
    age: Option<AgeInfo>,
    location: Option<Location>,
    category: Option<ServiceCategory>,
    transcript: Transcript,
    chat_pending: bool,
    chat_error: Option<String>,
    discovery: DiscoveryState,
    predictions: Vec<PlacePrediction>,
    tracker: SequenceTracker,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn age(&self) -> Option<&AgeInfo> {
        self.age.as_ref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn category(&self) -> Option<ServiceCategory> {
        self.category
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn chat_pending(&self) -> bool {
        self.chat_pending
    }

    pub fn chat_error(&self) -> Option<&str> {
        self.chat_error.as_deref()
    }

    pub fn discovery(&self) -> &DiscoveryState {
        &self.discovery
    }

    /// Currently displayed services; empty unless results are loaded.
    pub fn services(&self) -> &[Service] {
        match &self.discovery {
            DiscoveryState::Loaded(services) => services,
            _ => &[],
        }
    }

    pub fn predictions(&self) -> &[PlacePrediction] {
        &self.predictions
    }

    /// Whether result cards should omit addresses.
    pub fn hide_location(&self) -> bool {
        self.category.is_some_and(|c| c.hides_location())
    }

    fn advance(&mut self, target: SessionPhase) {
        if self.phase.can_transition_to(target) {
            tracing::info!(from = %self.phase, to = %target, "Session phase advanced");
            self.phase = target;
        }
    }

    // ── Age gate ────────────────────────────────────────────────────────

    /// Record the age bracket. Re-verification replaces the previous record.
    pub fn verify_age(&mut self, bracket: AgeBracket) -> AgeInfo {
        let info = AgeInfo::from_bracket(bracket);
        self.age = Some(info);
        self.advance(SessionPhase::AwaitingLocation);
        info
    }

    // ── Location ────────────────────────────────────────────────────────

    pub fn begin_location(&mut self) -> Result<Ticket, SessionError> {
        if self.phase == SessionPhase::AwaitingAge {
            return Err(self.wrong_phase("location"));
        }
        Ok(self.tracker.issue(RequestSlot::Location))
    }

    /// Apply an acquired location. Returns `false` if the acquisition was
    /// superseded.
    pub fn complete_location(
        &mut self,
        ticket: Ticket,
        location: Location,
    ) -> Result<bool, SessionError> {
        if !self.tracker.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, "Discarding stale location");
            return Ok(false);
        }
        self.set_location(location)?;
        Ok(true)
    }

    /// Replace the location wholesale. The first location readies the
    /// session and seeds the welcome message.
    pub fn set_location(&mut self, location: Location) -> Result<(), SessionError> {
        if self.phase == SessionPhase::AwaitingAge {
            return Err(self.wrong_phase("location"));
        }
        tracing::info!(place = %location.describe(), "Location set");
        self.location = Some(location);
        self.predictions.clear();
        self.tracker.invalidate(RequestSlot::Location);
        self.tracker.invalidate(RequestSlot::Predictions);
        self.reset_discovery();

        if self.phase == SessionPhase::AwaitingLocation {
            self.advance(SessionPhase::Ready);
            self.transcript.push(ChatMessage::assistant(WELCOME_MESSAGE));
        }
        Ok(())
    }

    /// Drop the location and results; phase, age, and transcript stay.
    pub fn change_location(&mut self) {
        self.location = None;
        self.tracker.invalidate(RequestSlot::Location);
        self.reset_discovery();
    }

    fn reset_discovery(&mut self) {
        self.discovery = DiscoveryState::Idle;
        self.tracker.invalidate(RequestSlot::Discovery);
    }

    pub fn begin_predictions(&mut self) -> Ticket {
        self.tracker.issue(RequestSlot::Predictions)
    }

    pub fn complete_predictions(&mut self, ticket: Ticket, predictions: Vec<PlacePrediction>) -> bool {
        if !self.tracker.is_current(&ticket) {
            return false;
        }
        self.predictions = predictions;
        true
    }

    pub fn prediction(&self, index: usize) -> Result<&PlacePrediction, SessionError> {
        self.predictions
            .get(index)
            .ok_or(SessionError::NoSuchPrediction(index))
    }

    // ── Discovery ───────────────────────────────────────────────────────

    /// Select a category. Prior results are cleared immediately.
    pub fn select_category(&mut self, category: ServiceCategory) {
        self.category = Some(category);
        self.reset_discovery();
    }

    pub fn begin_discovery(&mut self) -> Result<(Ticket, DiscoverRequest), SessionError> {
        if self.age.is_none() {
            return Err(SessionError::AgeMissing);
        }
        let location = self.location.as_ref().ok_or(SessionError::LocationMissing)?;
        let category = self.category.ok_or(SessionError::CategoryMissing)?;

        let request = DiscoverRequest::new(category, location);
        let ticket = self.tracker.issue(RequestSlot::Discovery);
        self.discovery = DiscoveryState::Loading;
        Ok((ticket, request))
    }

    /// Apply a discovery response. Results are replaced, never merged; a
    /// failure leaves an empty result set.
    pub fn complete_discovery(
        &mut self,
        ticket: Ticket,
        category: ServiceCategory,
        outcome: Result<Vec<RawPlace>, ApiError>,
    ) -> bool {
        if !self.tracker.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, "Discarding stale discovery response");
            return false;
        }
        self.discovery = match outcome {
            Ok(places) => {
                let services = normalize_places(places, category);
                tracing::info!(category = %category, count = services.len(), "Services loaded");
                DiscoveryState::Loaded(services)
            }
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "Discovery failed");
                DiscoveryState::Failed(DISCOVERY_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    // ── Chat ────────────────────────────────────────────────────────────

    /// Append the user's message and build the request carrying the whole
    /// transcript.
    pub fn begin_chat(&mut self, text: &str) -> Result<(Ticket, ChatRequest), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let age = self.age.ok_or(SessionError::AgeMissing)?;
        let location = self.location.clone().ok_or(SessionError::LocationMissing)?;

        self.transcript.push(ChatMessage::user(text));
        let request = ChatRequest::new(self.transcript.messages(), &location, age.age_category);
        let ticket = self.tracker.issue(RequestSlot::Chat);
        self.chat_pending = true;
        self.chat_error = None;
        Ok((ticket, request))
    }

    /// Apply a chat reply. On failure the transcript keeps only the user's
    /// message and an error is shown.
    pub fn complete_chat(&mut self, ticket: Ticket, outcome: Result<String, ApiError>) -> bool {
        if !self.tracker.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, "Discarding stale chat reply");
            return false;
        }
        self.chat_pending = false;
        match outcome {
            Ok(reply) => self.transcript.push(ChatMessage::assistant(reply)),
            Err(e) => {
                tracing::warn!(error = %e, "Chat turn failed");
                self.chat_error = Some(CHAT_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    fn wrong_phase(&self, action: &str) -> SessionError {
        SessionError::WrongPhase {
            phase: self.phase.to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgeCategory, Role};

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.verify_age(AgeBracket::Adult);
        session.set_location(Location::new(40.7, -74.0)).unwrap();
        session
    }

    fn place(name: &str) -> RawPlace {
        RawPlace {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            distance_km: Some(0.5),
            ..Default::default()
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            endpoint: "/api/test".to_string(),
            status: 500,
        }
    }

    #[test]
    fn walks_age_then_location_then_ready() {
        let mut session = Session::new();
        assert_eq!(session.phase(), SessionPhase::AwaitingAge);
        assert!(session.set_location(Location::new(0.0, 0.0)).is_err());

        let info = session.verify_age(AgeBracket::Teen);
        assert_eq!(info.age_category, AgeCategory::TeenSupport);
        assert_eq!(session.phase(), SessionPhase::AwaitingLocation);

        session.set_location(Location::new(1.0, 2.0)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn relocating_in_ready_does_not_reseed() {
        let mut session = ready_session();
        session.change_location();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.location().is_none());
        session.set_location(Location::new(3.0, 4.0)).unwrap();
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn reverification_replaces_age_without_moving_phase() {
        let mut session = ready_session();
        session.verify_age(AgeBracket::Preteen);
        assert_eq!(session.age().unwrap().age, 10);
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn chat_requires_age_and_location() {
        let mut session = Session::new();
        assert!(matches!(
            session.begin_chat("hi"),
            Err(SessionError::AgeMissing)
        ));
        session.verify_age(AgeBracket::Adult);
        assert!(matches!(
            session.begin_chat("hi"),
            Err(SessionError::LocationMissing)
        ));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn chat_after_change_location_is_blocked() {
        let mut session = ready_session();
        session.change_location();
        assert!(matches!(
            session.begin_chat("hi"),
            Err(SessionError::LocationMissing)
        ));
    }

    #[test]
    fn blank_chat_is_ignored() {
        let mut session = ready_session();
        assert!(matches!(
            session.begin_chat("   "),
            Err(SessionError::EmptyMessage)
        ));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn chat_request_carries_whole_transcript() {
        let mut session = ready_session();
        let (ticket, request) = session.begin_chat("  I need food ").unwrap();
        assert!(session.chat_pending());
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::Assistant);
        assert_eq!(request.messages[1].content, "I need food");
        assert_eq!(request.age_group, AgeCategory::AdultServices);
        assert_eq!(request.latitude, 40.7);

        assert!(session.complete_chat(ticket, Ok("Try the pantry.".to_string())));
        assert!(!session.chat_pending());
        assert_eq!(session.transcript().last().unwrap().role, Role::Assistant);

        let (_, second) = session.begin_chat("thanks").unwrap();
        assert_eq!(second.messages.len(), 4);
    }

    #[test]
    fn failed_chat_keeps_user_message() {
        let mut session = ready_session();
        let (ticket, _) = session.begin_chat("hello").unwrap();
        assert!(session.complete_chat(ticket, Err(server_error())));
        assert_eq!(session.chat_error(), Some(CHAT_ERROR_MESSAGE));
        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "hello");

        // A new turn clears the error.
        session.begin_chat("again").unwrap();
        assert!(session.chat_error().is_none());
    }

    #[test]
    fn stale_chat_reply_is_discarded() {
        let mut session = ready_session();
        let (first, _) = session.begin_chat("one").unwrap();
        let (second, _) = session.begin_chat("two").unwrap();
        assert!(!session.complete_chat(first, Ok("late".to_string())));
        assert!(session.complete_chat(second, Ok("fresh".to_string())));
        let contents: Vec<_> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert!(!contents.contains(&"late"));
        assert_eq!(contents.last(), Some(&"fresh"));
    }

    #[test]
    fn discovery_requires_category() {
        let mut session = ready_session();
        assert!(matches!(
            session.begin_discovery(),
            Err(SessionError::CategoryMissing)
        ));
    }

    #[test]
    fn discovery_requires_location() {
        let mut session = Session::new();
        session.verify_age(AgeBracket::Adult);
        session.select_category(ServiceCategory::Food);
        assert!(matches!(
            session.begin_discovery(),
            Err(SessionError::LocationMissing)
        ));
    }

    #[test]
    fn new_category_clears_results_first() {
        let mut session = ready_session();
        session.select_category(ServiceCategory::Food);
        let (ticket, request) = session.begin_discovery().unwrap();
        assert_eq!(request.category, ServiceCategory::Food);
        session.complete_discovery(ticket, ServiceCategory::Food, Ok(vec![place("Pantry")]));
        assert_eq!(session.services().len(), 1);

        session.select_category(ServiceCategory::Shelter);
        assert!(session.services().is_empty());
        assert_eq!(session.discovery(), &DiscoveryState::Idle);
    }

    #[test]
    fn response_for_superseded_category_is_dropped() {
        let mut session = ready_session();
        session.select_category(ServiceCategory::Food);
        let (food, _) = session.begin_discovery().unwrap();
        session.select_category(ServiceCategory::Legal);
        let (legal, _) = session.begin_discovery().unwrap();

        assert!(session.complete_discovery(legal, ServiceCategory::Legal, Ok(vec![place("Aid")])));
        assert!(!session.complete_discovery(food, ServiceCategory::Food, Ok(vec![place("Pantry")])));
        assert_eq!(session.services()[0].name, "Aid");
        assert_eq!(session.services()[0].category, ServiceCategory::Legal);
    }

    #[test]
    fn failed_discovery_never_shows_stale_results() {
        let mut session = ready_session();
        session.select_category(ServiceCategory::Food);
        let (ticket, _) = session.begin_discovery().unwrap();
        session.complete_discovery(ticket, ServiceCategory::Food, Ok(vec![place("Pantry")]));

        let (retry, _) = session.begin_discovery().unwrap();
        assert!(session.services().is_empty());
        session.complete_discovery(retry, ServiceCategory::Food, Err(server_error()));
        assert!(session.services().is_empty());
        assert_eq!(
            session.discovery(),
            &DiscoveryState::Failed(DISCOVERY_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn empty_places_is_loaded_not_failed() {
        let mut session = ready_session();
        session.select_category(ServiceCategory::Medical);
        let (ticket, _) = session.begin_discovery().unwrap();
        session.complete_discovery(ticket, ServiceCategory::Medical, Ok(Vec::new()));
        assert_eq!(session.discovery(), &DiscoveryState::Loaded(Vec::new()));
    }

    #[test]
    fn location_change_drops_results_and_in_flight_search() {
        let mut session = ready_session();
        session.select_category(ServiceCategory::Food);
        let (ticket, _) = session.begin_discovery().unwrap();
        session.set_location(Location::new(5.0, 6.0)).unwrap();
        assert!(!session.complete_discovery(ticket, ServiceCategory::Food, Ok(vec![place("Old")])));
        assert_eq!(session.discovery(), &DiscoveryState::Idle);
        assert_eq!(session.category(), Some(ServiceCategory::Food));
    }

    #[test]
    fn hide_location_only_for_emergency() {
        let mut session = ready_session();
        assert!(!session.hide_location());
        session.select_category(ServiceCategory::Emergency);
        assert!(session.hide_location());
        session.select_category(ServiceCategory::Food);
        assert!(!session.hide_location());
    }

    #[test]
    fn stale_location_is_discarded() {
        let mut session = Session::new();
        session.verify_age(AgeBracket::Adult);
        let first = session.begin_location().unwrap();
        let second = session.begin_location().unwrap();
        assert!(!session.complete_location(first, Location::new(1.0, 1.0)).unwrap());
        assert!(session.complete_location(second, Location::new(2.0, 2.0)).unwrap());
        assert_eq!(session.location().unwrap().latitude, 2.0);
    }

    #[test]
    fn predictions_follow_latest_query() {
        let mut session = ready_session();
        let old = session.begin_predictions();
        let new = session.begin_predictions();
        let p = |id: &str| PlacePrediction {
            place_id: id.to_string(),
            description: id.to_string(),
        };
        assert!(session.complete_predictions(new, vec![p("new")]));
        assert!(!session.complete_predictions(old, vec![p("old")]));
        assert_eq!(session.prediction(0).unwrap().place_id, "new");
        assert!(matches!(
            session.prediction(3),
            Err(SessionError::NoSuchPrediction(3))
        ));
    }
}
