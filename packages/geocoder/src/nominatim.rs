//! Nominatim / `OpenStreetMap` geocoder client.
//!
//! Forward lookups use the `/search` endpoint with `limit=1` and
//! `addressdetails=1`; reverse lookups use `/reverse` with
//! `addressdetails=1`. Both send the configured `User-Agent` and
//! `Accept-Language` headers on every request.
//!
//! The public instance allows **1 request per second**; callers are
//! responsible for pacing.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/> and
//! <https://nominatim.org/release-docs/develop/api/Reverse/>

use std::time::Duration;

use dharma_gates_center_models::Coordinates;
use dharma_gates_geography_models::GeocodeResult;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::{GeocodeError, Geocoder, GeocoderConfig};

/// A place as returned by Nominatim's `json` format.
///
/// Every field is optional; search results and reverse results share the
/// shape, and a failed reverse lookup carries only `error`.
#[derive(Debug, Default, Deserialize)]
struct Place {
    lat: Option<Coordinate>,
    lon: Option<Coordinate>,
    display_name: Option<String>,
    #[serde(default)]
    address: Option<AddressDetails>,
    error: Option<String>,
}

/// Nominatim encodes coordinates as strings, but some deployments emit
/// numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        };
        value.filter(|v: &f64| v.is_finite())
    }
}

/// The structured address breakdown (`addressdetails=1`).
#[derive(Debug, Default, Deserialize)]
struct AddressDetails {
    country: Option<String>,
    state: Option<String>,
    province: Option<String>,
    region: Option<String>,
    #[serde(rename = "ISO3166-2-lvl4")]
    iso3166_2_lvl4: Option<String>,
}

impl AddressDetails {
    fn country(&self) -> String {
        self.country.clone().unwrap_or_default()
    }

    /// First non-empty of state, province, region, then the ISO 3166-2
    /// subdivision code.
    fn state(&self) -> String {
        [
            &self.state,
            &self.province,
            &self.region,
            &self.iso3166_2_lvl4,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default()
    }
}

/// HTTP client for a Nominatim instance.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl NominatimClient {
    /// Creates a client that sends the configured identification headers.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if a header value is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let language =
            HeaderValue::from_str(&config.accept_language).map_err(|e| GeocodeError::Config {
                message: format!("invalid accept_language: {e}"),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, language);

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| GeocodeError::Config {
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self { client, config })
    }

    /// Creates a client from the embedded configuration plus environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the configuration is invalid.
    pub fn from_env() -> Result<Self, GeocodeError> {
        let config = GeocoderConfig::from_env().map_err(|e| GeocodeError::Config {
            message: e.to_string(),
        })?;
        Self::new(config)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Geocodes a free-text address, returning the top match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyQuery`] for a blank address,
    /// [`GeocodeError::NotFound`] for zero results, and a
    /// service-unavailable variant for transport, status or shape errors.
    pub async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        log::debug!("Nominatim search: {query}");

        let resp = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .inspect_err(|e| log::warn!("Nominatim search request failed: {e}"))?;

        let body = read_json(resp).await?;
        parse_search_response(query, &body)
    }

    /// Geocodes a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidCoordinates`] for out-of-range
    /// input, [`GeocodeError::NotFound`] when Nominatim has no address at
    /// that point, and a service-unavailable variant for transport, status
    /// or shape errors.
    pub async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeocodeResult, GeocodeError> {
        let coords = Coordinates::new(latitude, longitude).map_err(|_| {
            GeocodeError::InvalidCoordinates {
                latitude,
                longitude,
            }
        })?;

        log::debug!("Nominatim reverse: {coords}");

        let resp = self
            .client
            .get(&self.config.reverse_url)
            .query(&[
                ("lat", coords.latitude().to_string()),
                ("lon", coords.longitude().to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .inspect_err(|e| log::warn!("Nominatim reverse request failed: {e}"))?;

        let body = read_json(resp).await?;
        parse_reverse_response(coords, &body)
    }
}

#[async_trait::async_trait]
impl Geocoder for NominatimClient {
    async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        Self::forward(self, address).await
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<GeocodeResult, GeocodeError> {
        Self::reverse(self, latitude, longitude).await
    }
}

/// Checks the status and decodes the JSON body.
async fn read_json(resp: reqwest::Response) -> Result<serde_json::Value, GeocodeError> {
    let status = resp.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        log::warn!("Nominatim rate limit exceeded");
        return Err(GeocodeError::RateLimited);
    }

    if !status.is_success() {
        log::warn!("Nominatim returned status {status}");
        return Err(GeocodeError::Status {
            status: status.as_u16(),
        });
    }

    Ok(resp.json().await?)
}

/// Parses a `/search` response (a JSON array of places).
fn parse_search_response(
    query: &str,
    body: &serde_json::Value,
) -> Result<GeocodeResult, GeocodeError> {
    let places: Vec<Place> =
        serde_json::from_value(body.clone()).map_err(|e| GeocodeError::Parse {
            message: format!("Nominatim search response is not a list of places: {e}"),
        })?;

    let Some(first) = places.into_iter().next() else {
        log::info!("Nominatim: no match for {query:?}");
        return Err(GeocodeError::NotFound {
            query: query.to_string(),
        });
    };

    let latitude = first.lat.as_ref().and_then(Coordinate::value);
    let longitude = first.lon.as_ref().and_then(Coordinate::value);
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(GeocodeError::Parse {
            message: "Missing lat/lon in Nominatim response".to_string(),
        });
    };

    let address = first.address.unwrap_or_default();

    Ok(GeocodeResult {
        latitude,
        longitude,
        country: address.country(),
        state: address.state(),
        display_name: first.display_name.unwrap_or_default(),
    })
}

/// Parses a `/reverse` response (a single place object).
///
/// The response coordinates are used when present; otherwise the queried
/// coordinates are returned.
fn parse_reverse_response(
    coords: Coordinates,
    body: &serde_json::Value,
) -> Result<GeocodeResult, GeocodeError> {
    let place: Place = serde_json::from_value(body.clone()).map_err(|e| GeocodeError::Parse {
        message: format!("Nominatim reverse response is not a place: {e}"),
    })?;

    let not_found = || GeocodeError::NotFound {
        query: coords.to_string(),
    };

    if let Some(error) = &place.error {
        log::info!("Nominatim: no address at {coords}: {error}");
        return Err(not_found());
    }

    let Some(display_name) = place.display_name.clone().filter(|d| !d.is_empty()) else {
        log::info!("Nominatim: no address at {coords}");
        return Err(not_found());
    };

    let address = place.address.unwrap_or_default();

    Ok(GeocodeResult {
        latitude: place
            .lat
            .as_ref()
            .and_then(Coordinate::value)
            .unwrap_or_else(|| coords.latitude()),
        longitude: place
            .lon
            .as_ref()
            .and_then(Coordinate::value)
            .unwrap_or_else(|| coords.longitude()),
        country: address.country(),
        state: address.state(),
        display_name,
    })
}
