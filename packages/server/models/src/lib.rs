#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the Dharma Gates server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the directory types to allow independent evolution of the API
//! contract.

use dharma_gates_center_models::Center;
use dharma_gates_directory::{
    CenterFilter, CountryOrder, GroupedListing, submission::FieldError,
};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of centers currently loaded.
    pub centers: usize,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// User-facing message.
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Validation failure body for the suggestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFieldErrors {
    /// Summary message.
    pub error: String,
    /// One entry per failing field.
    pub fields: Vec<FieldError>,
}

/// Query parameters for the geocode endpoint.
///
/// Either `address` (forward) or both `lat` and `lon` (reverse).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeQueryParams {
    /// Free-text address to look up.
    pub address: Option<String>,
    /// Latitude for a reverse lookup.
    pub lat: Option<f64>,
    /// Longitude for a reverse lookup.
    pub lon: Option<f64>,
}

/// Geocode request after parameter validation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeRequest {
    Forward(String),
    Reverse { latitude: f64, longitude: f64 },
}

impl GeocodeQueryParams {
    /// Picks the lookup to perform. A non-blank address wins over
    /// coordinates; `None` when neither is usable.
    #[must_use]
    pub fn request(&self) -> Option<GeocodeRequest> {
        if let Some(address) = self.address.as_deref().map(str::trim)
            && !address.is_empty()
        {
            return Some(GeocodeRequest::Forward(address.to_string()));
        }
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Some(GeocodeRequest::Reverse {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Query parameters for the centers endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterQueryParams {
    /// Free text matched against name and address.
    pub search: Option<String>,
    /// Free text matched against the address.
    pub location: Option<String>,
    pub vehicle: Option<String>,
    #[serde(rename = "type")]
    pub center_type: Option<String>,
    pub setting: Option<String>,
    pub price_model: Option<String>,
    pub gender_policy: Option<String>,
    pub tradition: Option<String>,
    pub beginner_friendly: Option<bool>,
    pub ordination_possible: Option<bool>,
}

impl From<CenterQueryParams> for CenterFilter {
    fn from(params: CenterQueryParams) -> Self {
        Self {
            search: params.search.unwrap_or_default(),
            location: params.location.unwrap_or_default(),
            vehicle: params.vehicle.unwrap_or_default(),
            center_type: params.center_type.unwrap_or_default(),
            setting: params.setting.unwrap_or_default(),
            price_model: params.price_model.unwrap_or_default(),
            gender_policy: params.gender_policy.unwrap_or_default(),
            tradition: params.tradition.unwrap_or_default(),
            beginner_friendly: params.beginner_friendly,
            ordination_possible: params.ordination_possible,
        }
    }
}

/// Centers of one state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStateGroup {
    pub state: String,
    pub centers: Vec<Center>,
}

/// States of one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCountryGroup {
    pub country: String,
    pub states: Vec<ApiStateGroup>,
}

/// The sectioned listing in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGroupedListing {
    pub countries: Vec<ApiCountryGroup>,
    /// Centers whose address could not be resolved, sorted by name.
    pub unparseable: Vec<Center>,
}

impl ApiGroupedListing {
    /// Flattens a grouping into display order.
    #[must_use]
    pub fn from_grouped(grouped: &GroupedListing<'_, Center>, order: &CountryOrder) -> Self {
        let countries = grouped
            .sections(order)
            .into_iter()
            .map(|section| ApiCountryGroup {
                country: section.country.to_string(),
                states: section
                    .states
                    .into_iter()
                    .map(|state| ApiStateGroup {
                        state: state.state.to_string(),
                        centers: state.entries.iter().map(|c| (*c).clone()).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            countries,
            unparseable: grouped.unparseable.iter().map(|c| (*c).clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dharma_gates_directory::group_by_location;

    #[test]
    fn address_wins_over_coordinates() {
        let params = GeocodeQueryParams {
            address: Some(" Kyoto ".to_string()),
            lat: Some(1.0),
            lon: Some(2.0),
        };
        assert_eq!(
            params.request(),
            Some(GeocodeRequest::Forward("Kyoto".to_string()))
        );
    }

    #[test]
    fn reverse_needs_both_coordinates() {
        let half = GeocodeQueryParams {
            address: Some("  ".to_string()),
            lat: Some(1.0),
            lon: None,
        };
        assert_eq!(half.request(), None);

        let both = GeocodeQueryParams {
            lat: Some(1.0),
            lon: Some(2.0),
            ..GeocodeQueryParams::default()
        };
        assert_eq!(
            both.request(),
            Some(GeocodeRequest::Reverse {
                latitude: 1.0,
                longitude: 2.0
            })
        );
    }

    #[test]
    fn query_params_become_filter() {
        let params: CenterQueryParams = serde_json::from_value(serde_json::json!({
            "search": "zen",
            "type": "Temple",
            "priceModel": "Donation",
            "beginnerFriendly": true
        }))
        .unwrap();

        let filter = CenterFilter::from(params);
        assert_eq!(filter.search, "zen");
        assert_eq!(filter.center_type, "Temple");
        assert_eq!(filter.price_model, "Donation");
        assert_eq!(filter.beginner_friendly, Some(true));
        assert_eq!(filter.ordination_possible, None);
    }

    #[test]
    fn grouped_listing_serializes_in_display_order() {
        let centers = vec![
            Center {
                name: Some("Wat".to_string()),
                address: Some("x|||Thailand|||Ubon".to_string()),
                ..Center::default()
            },
            Center {
                name: Some("IMS".to_string()),
                address: Some("x|||United States|||Massachusetts".to_string()),
                ..Center::default()
            },
            Center {
                name: Some("Nowhere".to_string()),
                ..Center::default()
            },
        ];

        let grouped = group_by_location(&centers);
        let api = ApiGroupedListing::from_grouped(&grouped, &CountryOrder::default());
        let json = serde_json::to_value(&api).unwrap();

        assert_eq!(json["countries"][0]["country"], "United States");
        assert_eq!(json["countries"][0]["states"][0]["state"], "Massachusetts");
        assert_eq!(json["countries"][0]["states"][0]["centers"][0]["name"], "IMS");
        assert_eq!(json["countries"][1]["country"], "Thailand");
        assert_eq!(json["unparseable"][0]["name"], "Nowhere");
    }
}
