//! LocationResolver — combines the device, places, and reverse-geocode
//! collaborators behind two acquisition paths.

use std::sync::Arc;

use crate::api::Backend;
use crate::error::{ApiError, LocationError};
use crate::model::Location;

use super::device::Geolocator;
use super::places::{PlacePrediction, PlacesProvider};

pub struct LocationResolver {
    geolocator: Arc<dyn Geolocator>,
    places: Option<Arc<dyn PlacesProvider>>,
    backend: Arc<dyn Backend>,
    reverse_geocode: bool,
}

impl LocationResolver {
    pub fn new(
        geolocator: Arc<dyn Geolocator>,
        places: Option<Arc<dyn PlacesProvider>>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            geolocator,
            places,
            backend,
            reverse_geocode: true,
        }
    }

    pub fn with_reverse_geocode(mut self, enabled: bool) -> Self {
        self.reverse_geocode = enabled;
        self
    }

    /// Whether manual place search is available.
    pub fn has_places(&self) -> bool {
        self.places.is_some()
    }

    /// Device path. A failed enrichment keeps the bare coordinates; a failed
    /// fix is returned to the caller with no retry.
    pub async fn locate_device(&self) -> Result<Location, LocationError> {
        let (latitude, longitude) = self.geolocator.current_position().await.map_err(|e| {
            tracing::warn!(error = %e, "Device geolocation failed");
            e
        })?;

        if !self.reverse_geocode {
            return Ok(Location::new(latitude, longitude));
        }

        match self.backend.reverse_geocode(latitude, longitude).await {
            Ok(location) => {
                tracing::debug!(place = %location.describe(), "Reverse geocode succeeded");
                Ok(location)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reverse geocode failed; keeping coordinates");
                Ok(Location::new(latitude, longitude))
            }
        }
    }

    /// Manual path, step one: candidate predictions for `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<PlacePrediction>, LocationError> {
        let places = self.places.as_ref().ok_or(ApiError::PlacesUnavailable)?;
        places.autocomplete(query).await
    }

    /// Manual path, step two: coordinates for the chosen prediction.
    pub async fn resolve(&self, prediction: &PlacePrediction) -> Result<Location, LocationError> {
        let places = self.places.as_ref().ok_or(ApiError::PlacesUnavailable)?;
        places.details(&prediction.place_id).await
    }
}
