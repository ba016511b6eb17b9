#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic value types shared by the geocoder, the address parser and
//! the directory listing.
//!
//! Throughout these types an empty string is the "unknown" sentinel for
//! `country` and `state`; they are never optional.

pub mod regions;

use serde::{Deserialize, Serialize};

/// A normalized geocoding result for a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Human-readable address returned by the geocoder.
    pub display_name: String,
    /// Country name, or empty if the service supplied none.
    pub country: String,
    /// State / province / region, or empty if the service supplied none.
    pub state: String,
}

/// A country/state pair derived from a stored address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLocation {
    /// Country name as it will be displayed.
    pub country: String,
    /// Normalized state or province name.
    pub state: String,
}

impl ParsedLocation {
    /// Creates a location from anything string-like.
    #[must_use]
    pub fn new(country: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            state: state.into(),
        }
    }
}
