//! HTTP implementation of [`Backend`] on reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::model::Location;

use super::Backend;
use super::wire::{
    ChatRequest, ChatResponse, ContactRequest, DiscoverRequest, DiscoverResponse, RawPlace,
    ReverseGeocodeRequest, ReverseGeocodeResponse,
};

const CHAT_PATH: &str = "/api/chat";
const DISCOVER_PATH: &str = "/api/discover";
const REVERSE_GEOCODE_PATH: &str = "/api/reverse_geocode";
const CONTACT_PATH: &str = "/api/contact";

/// JSON-over-HTTP backend client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
            timeout: config.request_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `body` and return the raw response once the status is a success.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(
                endpoint = path,
                status = status.as_u16(),
                detail = %detail.chars().take(200).collect::<String>(),
                "Backend returned an error status"
            );
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.post(path, body).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        tracing::debug!(
            turns = request.messages.len(),
            age_group = %request.age_group,
            "Sending chat turn"
        );
        let resp: ChatResponse = self.post_json(CHAT_PATH, request).await?;
        Ok(resp.reply)
    }

    async fn discover(&self, request: &DiscoverRequest) -> Result<Vec<RawPlace>, ApiError> {
        tracing::debug!(category = %request.category, "Sending discovery query");
        let resp: DiscoverResponse = self.post_json(DISCOVER_PATH, request).await?;
        Ok(resp.places)
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Location, ApiError> {
        let body = ReverseGeocodeRequest {
            latitude,
            longitude,
        };
        let resp: ReverseGeocodeResponse = self.post_json(REVERSE_GEOCODE_PATH, &body).await?;
        Ok(resp.merge_into(latitude, longitude))
    }

    async fn submit_contact(&self, request: &ContactRequest) -> Result<(), ApiError> {
        self.post(CONTACT_PATH, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let backend = HttpBackend::new(&ClientConfig::new("http://localhost:9000/")).unwrap();
        assert_eq!(backend.url(CHAT_PATH), "http://localhost:9000/api/chat");
        assert_eq!(
            backend.url(REVERSE_GEOCODE_PATH),
            "http://localhost:9000/api/reverse_geocode"
        );
    }
}
