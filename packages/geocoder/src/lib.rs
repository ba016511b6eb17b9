#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding for center submissions.
//!
//! Resolves a free-text address (forward) or a coordinate pair (reverse)
//! to a [`GeocodeResult`] using Nominatim / `OpenStreetMap`. The country
//! and state are read from Nominatim's structured address breakdown;
//! missing fields become empty strings rather than errors.
//!
//! Failures are split into two caller-visible classes (see
//! [`GeocodeErrorKind`]): the service answered but found nothing, or the
//! service could not be used at all. The client does not retry, cache or
//! back off; each call is a single independent request.

pub mod config;
pub mod nominatim;

use dharma_gates_geography_models::GeocodeResult;
use thiserror::Error;

pub use config::{ConfigError, GeocoderConfig};
pub use nominatim::NominatimClient;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The service was reached but returned no match.
    #[error("No geocoding match for {query:?}")]
    NotFound {
        /// The address or coordinates that were looked up.
        query: String,
    },

    /// HTTP request failed or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Geocoding service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The response did not have the expected shape.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The HTTP client could not be configured.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// The address to look up was empty.
    #[error("Address must not be empty")]
    EmptyQuery,

    /// Reverse lookup with non-finite or out-of-range coordinates.
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates {
        /// Rejected latitude.
        latitude: f64,
        /// Rejected longitude.
        longitude: f64,
    },
}

/// Coarse classification of a [`GeocodeError`] for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeErrorKind {
    /// No match: the user should check their input.
    NotFound,
    /// Transient or infrastructure failure: the user may try again.
    ServiceUnavailable,
    /// The request was rejected before contacting the service.
    InvalidInput,
}

impl GeocodeError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> GeocodeErrorKind {
        match self {
            Self::NotFound { .. } => GeocodeErrorKind::NotFound,
            Self::Http(_)
            | Self::Status { .. }
            | Self::RateLimited
            | Self::Parse { .. }
            | Self::Config { .. } => GeocodeErrorKind::ServiceUnavailable,
            Self::EmptyQuery | Self::InvalidCoordinates { .. } => GeocodeErrorKind::InvalidInput,
        }
    }

    /// Whether the service was reached and simply had no match.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), GeocodeErrorKind::NotFound)
    }

    /// Whether the failure is transient / infrastructure related.
    #[must_use]
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(self.kind(), GeocodeErrorKind::ServiceUnavailable)
    }
}

/// A forward and reverse geocoding backend.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Finds the best match for a free-text address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] when nothing matches, or a
    /// service-unavailable variant when the lookup could not be made.
    async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;

    /// Finds the address at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidCoordinates`] for out-of-range
    /// input, [`GeocodeError::NotFound`] when nothing matches, or a
    /// service-unavailable variant when the lookup could not be made.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<GeocodeResult, GeocodeError>;
}
