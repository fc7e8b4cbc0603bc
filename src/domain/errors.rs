//! Domain errors for the dig-site viewer.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the remote API adapters (feed, detail, annotation).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream rejected the request
    #[error("Invalid request ({status}): {body}")]
    InvalidRequest { status: u16, body: String },

    /// Upstream is rate limiting us
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Upstream failed with a 5xx status
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// Transport failure before a response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Any status we do not classify
    #[error("Unexpected HTTP {status}: {body}")]
    Unexpected { status: u16, body: String },

    /// A configured base URL cannot carry a path segment
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create error from HTTP status code and response body
    ///
    /// - 404, 410: Not found
    /// - 400..=499 (except 429): Invalid request
    /// - 429: Rate limit exceeded
    /// - 500..=599: Server error
    /// - Other: Unexpected
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            404 | 410 => Self::NotFound(body),
            429 => Self::RateLimitExceeded,
            code @ 400..=499 => Self::InvalidRequest { status: code, body },
            code @ 500..=599 => Self::ServerError { status: code, body },
            code => Self::Unexpected { status: code, body },
        }
    }

    /// Returns true when the upstream reported the resource as missing
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors raised by the persisted snapshot slot.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Errors surfaced by a marker activation: the detail lookup or the
/// annotation lookup that follows it.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Detail lookup failed for occurrence {id}: {source}")]
    DetailFailed {
        id: String,
        #[source]
        source: Arc<ApiError>,
    },

    #[error("No annotation found for taxon '{taxon}': {source}")]
    AnnotationFailed {
        taxon: String,
        #[source]
        source: ApiError,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;
