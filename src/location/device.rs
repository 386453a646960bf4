//! Platform geolocation.

use async_trait::async_trait;

use crate::error::LocationError;

/// Source of the device's current coordinates.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Returns `(latitude, longitude)`.
    async fn current_position(&self) -> Result<(f64, f64), LocationError>;
}

/// A device pinned to a configured position.
pub struct FixedGeolocator {
    latitude: f64,
    longitude: f64,
}

impl FixedGeolocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<(f64, f64), LocationError> {
        Ok((self.latitude, self.longitude))
    }
}

/// A device without location access.
pub struct UnavailableGeolocator;

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<(f64, f64), LocationError> {
        Err(LocationError::PermissionDenied)
    }
}
