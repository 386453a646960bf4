//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Places web service root.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `https://api.example.org`. No trailing slash.
    pub api_base_url: String,
    /// Places API key. Manual place search is disabled without one.
    pub places_api_key: Option<SecretString>,
    /// Places web service root.
    pub places_base_url: String,
    /// Fixed device position standing in for platform geolocation.
    pub device_position: Option<(f64, f64)>,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Whether device fixes are enriched through the reverse-geocode endpoint.
    pub reverse_geocode: bool,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            places_api_key: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            device_position: None,
            request_timeout: None,
            reverse_geocode: true,
        }
    }

    /// Build config from environment variables.
    /// `CONNECTCARE_API_BASE_URL` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("CONNECTCARE_API_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("CONNECTCARE_API_BASE_URL".to_string()))?;
        if api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "CONNECTCARE_API_BASE_URL".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let places_api_key = std::env::var("CONNECTCARE_PLACES_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);

        let places_base_url = std::env::var("CONNECTCARE_PLACES_BASE_URL")
            .map(|u| normalize_base_url(&u))
            .unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string());

        let device_position = parse_device_position(
            std::env::var("CONNECTCARE_DEVICE_LATITUDE").ok().as_deref(),
            std::env::var("CONNECTCARE_DEVICE_LONGITUDE").ok().as_deref(),
        )?;

        let request_timeout = std::env::var("CONNECTCARE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let reverse_geocode = std::env::var("CONNECTCARE_REVERSE_GEOCODE")
            .ok()
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),
            places_api_key,
            places_base_url,
            device_position,
            request_timeout,
            reverse_geocode,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Both coordinates must be present and in range, or both absent.
fn parse_device_position(
    lat: Option<&str>,
    lng: Option<&str>,
) -> Result<Option<(f64, f64)>, ConfigError> {
    let (lat, lng) = match (lat, lng) {
        (None, None) => return Ok(None),
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(ConfigError::InvalidValue {
                key: "CONNECTCARE_DEVICE_LATITUDE/LONGITUDE".to_string(),
                message: "both coordinates must be set together".to_string(),
            });
        }
    };

    let lat: f64 = lat.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: "CONNECTCARE_DEVICE_LATITUDE".to_string(),
        message: format!("not a number: {lat}"),
    })?;
    let lng: f64 = lng.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: "CONNECTCARE_DEVICE_LONGITUDE".to_string(),
        message: format!("not a number: {lng}"),
    })?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(ConfigError::InvalidValue {
            key: "CONNECTCARE_DEVICE_LATITUDE/LONGITUDE".to_string(),
            message: format!("out of range: {lat}, {lng}"),
        });
    }

    Ok(Some((lat, lng)))
}
