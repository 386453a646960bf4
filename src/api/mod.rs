//! Request/response adapter for the external backend.
//!
//! The backend is an opaque collaborator behind the [`Backend`] trait.
//! [`HttpBackend`] speaks JSON over HTTP to the four endpoints; tests swap in
//! stubs or a local mock server.

pub mod http;
pub mod normalize;
pub mod wire;

pub use http::HttpBackend;
pub use normalize::normalize_places;
pub use wire::{
    ChatRequest, ContactRequest, DiscoverRequest, RawPlace, ReverseGeocodeRequest, WireMessage,
};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::Location;

/// The external backend. One HTTP round trip per call, no retries.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/chat`; returns the assistant reply.
    async fn chat(&self, request: &ChatRequest) -> Result<String, ApiError>;

    /// `POST /api/discover`; returns raw place records.
    async fn discover(&self, request: &DiscoverRequest) -> Result<Vec<RawPlace>, ApiError>;

    /// `POST /api/reverse_geocode`; descriptors merged over the coordinates.
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Location, ApiError>;

    /// `POST /api/contact`
    async fn submit_contact(&self, request: &ContactRequest) -> Result<(), ApiError>;
}
