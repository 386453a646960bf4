//! Error types for the ConnectCare client.

use std::time::Duration;

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors from the backend and the places provider.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("Request to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Places provider is not configured")]
    PlacesUnavailable,
}

impl ApiError {
    /// Classify a reqwest transport error for `endpoint`.
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error, timeout: Option<Duration>) -> Self {
        if err.is_timeout() {
            if let Some(timeout) = timeout {
                return Self::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout,
                };
            }
        }
        if err.is_decode() {
            return Self::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            };
        }
        Self::RequestFailed {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Location acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Device position unavailable: {0}")]
    Unavailable(String),

    #[error("Place {place_id} has no geometry")]
    NoGeometry { place_id: String },

    #[error("Place lookup failed: {0}")]
    Lookup(#[from] ApiError),
}

/// Session sequencing errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session in phase {phase} cannot accept {action}")]
    WrongPhase { phase: String, action: String },

    #[error("Age has not been verified")]
    AgeMissing,

    #[error("Location has not been set")]
    LocationMissing,

    #[error("No service category selected")]
    CategoryMissing,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("No prediction at position {0}")]
    NoSuchPrediction(usize),
}

/// Contact form errors.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),

    #[error("Submission failed: {0}")]
    Submit(#[from] ApiError),
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
