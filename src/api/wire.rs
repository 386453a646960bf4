//! JSON request and response bodies for the backend endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{AgeCategory, ChatMessage, Location, Role, ServiceCategory};

/// A transcript turn as sent to `/api/chat` (no timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    pub latitude: f64,
    pub longitude: f64,
    pub age_group: AgeCategory,
}

impl ChatRequest {
    /// Full prior history plus the new turn, trimmed to role/content.
    pub fn new(history: &[ChatMessage], location: &Location, age_group: AgeCategory) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
            latitude: location.latitude,
            longitude: location.longitude,
            age_group,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `POST /api/discover`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverRequest {
    pub category: ServiceCategory,
    pub latitude: f64,
    pub longitude: f64,
}

impl DiscoverRequest {
    pub fn new(category: ServiceCategory, location: &Location) -> Self {
        Self {
            category,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// A place record exactly as the backend returns it. Unknown fields
/// (including any `category`) are ignored, and `null` reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPlace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Any JSON number; narrowed to a count during normalization.
    #[serde(default)]
    pub reviews: Option<f64>,
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub maps_url: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverResponse {
    #[serde(deserialize_with = "skip_malformed_places")]
    pub places: Vec<RawPlace>,
}

/// A record that still fails to parse is dropped so the rest of the
/// response survives.
fn skip_malformed_places<'de, D>(deserializer: D) -> Result<Vec<RawPlace>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawPlace>(value) {
            Ok(place) => Some(place),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed place record");
                None
            }
        })
        .collect())
}

/// `POST /api/reverse_geocode`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseGeocodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ReverseGeocodeResponse {
    /// Descriptors merged over the original coordinates.
    pub fn merge_into(self, latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
            city: self.city,
            state: self.state,
            country: self.country,
        }
    }
}

/// `POST /api/contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
