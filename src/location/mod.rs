//! Location acquisition: device position or manual place search.

pub mod device;
pub mod places;
pub mod resolver;

pub use device::{FixedGeolocator, Geolocator, UnavailableGeolocator};
pub use places::{GooglePlacesClient, PlacePrediction, PlacesProvider};
pub use resolver::LocationResolver;

/// Shown when device geolocation is denied or fails.
pub const LOCATION_UNAVAILABLE_MESSAGE: &str =
    "Unable to get your location. Please enable location services.";
