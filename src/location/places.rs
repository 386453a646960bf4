//! Place autocomplete and details via the Google Places web service.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{ApiError, ConfigError, LocationError};
use crate::model::Location;

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
}

/// Third-party place search.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Predictions for a free-text query. Blank queries yield nothing.
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, LocationError>;

    /// Coordinates (lat/lng only) of the chosen prediction.
    async fn details(&self, place_id: &str) -> Result<Location, LocationError>;
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Vec<PlacePrediction>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Places web service client.
pub struct GooglePlacesClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl GooglePlacesClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
            timeout,
        })
    }

    async fn get<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(params)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e, self.timeout))?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.json::<R>().await.map_err(|e| ApiError::InvalidResponse {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, LocationError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let path = "/place/autocomplete/json";
        let resp: AutocompleteResponse = self
            .get(path, &[("input", query), ("types", "geocode")])
            .await?;

        match resp.status.as_str() {
            "OK" => Ok(resp.predictions),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(ApiError::InvalidResponse {
                endpoint: path.to_string(),
                reason: format!("status {other}"),
            }
            .into()),
        }
    }

    async fn details(&self, place_id: &str) -> Result<Location, LocationError> {
        let path = "/place/details/json";
        let resp: DetailsResponse = self
            .get(path, &[("place_id", place_id), ("fields", "geometry")])
            .await?;

        if resp.status != "OK" {
            return Err(ApiError::InvalidResponse {
                endpoint: path.to_string(),
                reason: format!("status {}", resp.status),
            }
            .into());
        }

        resp.result
            .and_then(|r| r.geometry)
            .map(|g| Location::new(g.location.lat, g.location.lng))
            .ok_or_else(|| LocationError::NoGeometry {
                place_id: place_id.to_string(),
            })
    }
}
