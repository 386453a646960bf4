//! SessionController — drives the session through its collaborators.
//!
//! The session lock is held only for the synchronous begin/complete steps,
//! never across a network call, so overlapping requests are possible and are
//! reconciled by the per-slot tickets.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::Backend;
use crate::error::Result;
use crate::location::{LocationResolver, PlacePrediction};
use crate::model::{AgeBracket, AgeInfo, Location, ServiceCategory};

use super::model::Session;
use super::sequence::Ticket;

pub struct SessionController {
    session: Arc<RwLock<Session>>,
    backend: Arc<dyn Backend>,
    resolver: Arc<LocationResolver>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn Backend>, resolver: Arc<LocationResolver>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            backend,
            resolver,
        }
    }

    /// Shared handle for views.
    pub fn session(&self) -> Arc<RwLock<Session>> {
        Arc::clone(&self.session)
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub async fn verify_age(&self, bracket: AgeBracket) -> AgeInfo {
        self.session.write().await.verify_age(bracket)
    }

    /// Acquire the device position. `Ok(None)` means a newer acquisition
    /// superseded this one.
    pub async fn locate_with_device(&self) -> Result<Option<Location>> {
        let ticket = self.session.write().await.begin_location()?;
        let location = self.resolver.locate_device().await?;
        self.apply_location(ticket, location).await
    }

    /// Fetch predictions for a manual place query and keep them in the
    /// session for [`Self::choose_place`].
    pub async fn search_places(&self, query: &str) -> Result<Vec<PlacePrediction>> {
        let ticket = self.session.write().await.begin_predictions();
        let predictions = self.resolver.search(query).await?;
        let mut session = self.session.write().await;
        session.complete_predictions(ticket, predictions);
        Ok(session.predictions().to_vec())
    }

    /// Resolve the prediction at `index` and make it the location.
    pub async fn choose_place(&self, index: usize) -> Result<Option<Location>> {
        let (ticket, prediction) = {
            let mut session = self.session.write().await;
            let prediction = session.prediction(index)?.clone();
            (session.begin_location()?, prediction)
        };
        let location = self.resolver.resolve(&prediction).await?;
        self.apply_location(ticket, location).await
    }

    async fn apply_location(
        &self,
        ticket: Ticket,
        location: Location,
    ) -> Result<Option<Location>> {
        let applied = self
            .session
            .write()
            .await
            .complete_location(ticket, location.clone())?;
        Ok(applied.then_some(location))
    }

    pub async fn change_location(&self) {
        self.session.write().await.change_location();
    }

    /// Select a category and, if a location is set, search immediately.
    /// Returns whether a response was applied.
    pub async fn select_category(&self, category: ServiceCategory) -> Result<bool> {
        let has_location = {
            let mut session = self.session.write().await;
            session.select_category(category);
            session.location().is_some()
        };
        if !has_location {
            return Ok(false);
        }
        self.search().await
    }

    /// Run a discovery query for the current category and location. Backend
    /// failures are recorded in the session rather than returned.
    pub async fn search(&self) -> Result<bool> {
        let (ticket, request) = self.session.write().await.begin_discovery()?;
        let outcome = self.backend.discover(&request).await;
        Ok(self
            .session
            .write()
            .await
            .complete_discovery(ticket, request.category, outcome))
    }

    /// Send a chat turn. Backend failures are recorded in the session rather
    /// than returned.
    pub async fn send_message(&self, text: &str) -> Result<bool> {
        let (ticket, request) = self.session.write().await.begin_chat(text)?;
        let outcome = self.backend.chat(&request).await;
        Ok(self.session.write().await.complete_chat(ticket, outcome))
    }
}
