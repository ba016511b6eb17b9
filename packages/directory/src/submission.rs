//! The "suggest a center" workflow.
//!
//! A suggestion is validated, its coordinates are reverse geocoded, and
//! the geocoder's answer is stored as a composite address on a pending
//! [`Center`]. Persisting that center is left to the storage layer.

use std::sync::LazyLock;

use dharma_gates_address::encode_result;
use dharma_gates_center_models::{Center, CenterSuggestion, Coordinates, CoordinatesError};
use dharma_gates_geocoder::{GeocodeError, Geocoder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static WEBSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid regex"));

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field name.
    pub field: String,
    /// User-facing message.
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors from preparing a suggestion.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// One or more fields failed validation.
    #[error("Invalid submission: {} field error(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// The coordinates could not be reverse geocoded.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validates a suggestion, returning its parsed coordinates.
///
/// # Errors
///
/// Returns every failing field when validation fails.
pub fn validate(suggestion: &CenterSuggestion) -> Result<Coordinates, Vec<FieldError>> {
    let mut errors = Vec::new();

    if suggestion.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if suggestion.center_type.trim().is_empty() {
        errors.push(FieldError::new("center_type", "Center type is required"));
    }
    if suggestion.vehicle.trim().is_empty() {
        errors.push(FieldError::new("vehicle", "Vehicle is required"));
    }
    if is_blank(suggestion.description.as_deref()) {
        errors.push(FieldError::new("description", "Description is required"));
    }

    let coordinates = if suggestion.coordinates.trim().is_empty() {
        errors.push(FieldError::new("coordinates", "Coordinates are required"));
        None
    } else {
        match Coordinates::parse(&suggestion.coordinates) {
            Ok(coords) => Some(coords),
            Err(e) => {
                let field = match e {
                    CoordinatesError::InvalidFormat { .. } => "coordinates",
                    CoordinatesError::LatitudeOutOfRange(_) => "latitude",
                    CoordinatesError::LongitudeOutOfRange(_) => "longitude",
                };
                errors.push(FieldError::new(field, e.to_string()));
                None
            }
        }
    };

    if let Some(email) = suggestion.email.as_deref().filter(|e| !e.is_empty())
        && !EMAIL_RE.is_match(email)
    {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
    if let Some(website) = suggestion.website.as_deref().filter(|w| !w.is_empty())
        && !WEBSITE_RE.is_match(website)
    {
        errors.push(FieldError::new("website", "Invalid website URL"));
    }

    match coordinates {
        Some(coords) if errors.is_empty() => Ok(coords),
        _ => Err(errors),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates, reverse geocodes and converts a suggestion into a pending
/// center.
///
/// The center keeps the coordinates the user entered; its address is the
/// composite encoding of the reverse geocoding result.
///
/// # Errors
///
/// Returns [`SubmissionError::Invalid`] on validation failure and
/// [`SubmissionError::Geocode`] when reverse geocoding fails.
pub async fn prepare(
    geocoder: &dyn Geocoder,
    suggestion: CenterSuggestion,
) -> Result<Center, SubmissionError> {
    let coords = validate(&suggestion).map_err(SubmissionError::Invalid)?;

    let place = geocoder
        .reverse(coords.latitude(), coords.longitude())
        .await
        .inspect_err(|e| log::warn!("Reverse geocoding {coords} for a suggestion failed: {e}"))?;

    log::info!(
        "Prepared suggestion {:?} in {} / {}",
        suggestion.name,
        place.country,
        place.state
    );

    Ok(Center {
        id: String::new(),
        name: Some(suggestion.name.trim().to_string()),
        center_type: Some(suggestion.center_type),
        vehicle: Some(suggestion.vehicle),
        description: non_empty(suggestion.description),
        website: non_empty(suggestion.website),
        address: Some(encode_result(&place)),
        email: non_empty(suggestion.email),
        phone: non_empty(suggestion.phone),
        latitude: Some(coords.latitude()),
        longitude: Some(coords.longitude()),
        beginner_friendly: suggestion.beginner_friendly,
        ordination_possible: suggestion.ordination_possible,
        community_size: non_empty(suggestion.community_size),
        dietary_info: non_empty(suggestion.dietary_info),
        gender_policy: non_empty(suggestion.gender_policy),
        involvement_method: non_empty(suggestion.involvement_method),
        length_of_stay: non_empty(suggestion.length_of_stay),
        price_model: non_empty(suggestion.price_model),
        price_details: non_empty(suggestion.price_details),
        setting: non_empty(suggestion.setting),
        languages_spoken: suggestion.languages_spoken,
        practices: suggestion.practices,
        teachers: suggestion.teachers,
        traditions: suggestion.traditions,
        photos: None,
        pending: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dharma_gates_geography_models::GeocodeResult;

    struct FixedGeocoder(Option<GeocodeResult>);

    #[async_trait::async_trait]
    impl Geocoder for FixedGeocoder {
        async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            self.0.clone().ok_or_else(|| GeocodeError::NotFound {
                query: address.to_string(),
            })
        }

        async fn reverse(&self, latitude: f64, longitude: f64) -> Result<GeocodeResult, GeocodeError> {
            self.0.clone().ok_or_else(|| GeocodeError::NotFound {
                query: format!("{latitude}, {longitude}"),
            })
        }
    }

    fn valid_suggestion() -> CenterSuggestion {
        CenterSuggestion {
            name: " Wat Pah Nanachat ".to_string(),
            center_type: "Monastery".to_string(),
            vehicle: "Theravada".to_string(),
            description: Some("International forest monastery".to_string()),
            coordinates: "15.1234, 104.5678".to_string(),
            email: Some(String::new()),
            website: Some("https://watpahnanachat.org".to_string()),
            ..CenterSuggestion::default()
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_suggestion_passes() {
        let coords = validate(&valid_suggestion()).unwrap();
        assert!((coords.latitude() - 15.1234).abs() < 1e-9);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate(&CenterSuggestion::default()).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["name", "center_type", "vehicle", "description", "coordinates"]
        );
    }

    #[test]
    fn reports_coordinate_range_by_axis() {
        let lat = CenterSuggestion {
            coordinates: "95, 10".to_string(),
            ..valid_suggestion()
        };
        assert_eq!(fields(&validate(&lat).unwrap_err()), vec!["latitude"]);

        let lon = CenterSuggestion {
            coordinates: "45, 190".to_string(),
            ..valid_suggestion()
        };
        assert_eq!(fields(&validate(&lon).unwrap_err()), vec!["longitude"]);

        let garbage = CenterSuggestion {
            coordinates: "somewhere".to_string(),
            ..valid_suggestion()
        };
        assert_eq!(fields(&validate(&garbage).unwrap_err()), vec!["coordinates"]);
    }

    #[test]
    fn rejects_bad_email_and_website() {
        let suggestion = CenterSuggestion {
            email: Some("not an email".to_string()),
            website: Some("www.example.org".to_string()),
            ..valid_suggestion()
        };
        assert_eq!(
            fields(&validate(&suggestion).unwrap_err()),
            vec!["email", "website"]
        );
    }

    #[tokio::test]
    async fn prepare_stores_composite_address() {
        let geocoder = FixedGeocoder(Some(GeocodeResult {
            latitude: 15.12,
            longitude: 104.56,
            display_name: "Bung Wai, Warin Chamrap, Ubon Ratchathani Province, Thailand".to_string(),
            country: "Thailand".to_string(),
            state: "Ubon Ratchathani Province".to_string(),
        }));

        let center = prepare(&geocoder, valid_suggestion()).await.unwrap();

        assert!(center.pending);
        assert_eq!(center.name.as_deref(), Some("Wat Pah Nanachat"));
        assert_eq!(
            center.address.as_deref(),
            Some("Bung Wai, Warin Chamrap, Ubon Ratchathani Province, Thailand|||Thailand|||Ubon Ratchathani Province")
        );
        assert_eq!(center.coordinates(), Some((15.1234, 104.5678)));
        assert_eq!(center.email, None);
    }

    #[tokio::test]
    async fn prepare_propagates_not_found() {
        let err = prepare(&FixedGeocoder(None), valid_suggestion())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Geocode(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn prepare_rejects_invalid_before_geocoding() {
        let err = prepare(&FixedGeocoder(None), CenterSuggestion::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Invalid(ref errors) if errors.len() == 5));
    }
}
