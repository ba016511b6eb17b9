//! Validated WGS84 coordinate pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when building or parsing [`Coordinates`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatesError {
    /// Text was not of the form `"lat, lon"` with two finite numbers.
    #[error("Invalid coordinate format: {input:?}")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },

    /// Latitude outside `[-90, 90]`.
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]`.
    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

/// A latitude/longitude pair that is finite and within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validates and builds a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesError`] if either value is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinatesError::InvalidFormat {
                input: format!("{latitude}, {longitude}"),
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses `"lat, lon"` text as typed into the suggestion form.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesError`] if the text is not two comma-separated
    /// numbers or the values are out of range.
    pub fn parse(input: &str) -> Result<Self, CoordinatesError> {
        let invalid = || CoordinatesError::InvalidFormat {
            input: input.to_string(),
        };

        let mut parts = input.split(',').map(str::trim);
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let latitude: f64 = lat.parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.parse().map_err(|_| invalid())?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }

        Self::new(latitude, longitude)
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_input() {
        let coords = Coordinates::parse(" 15.1234 , 104.5678 ").unwrap();
        assert!((coords.latitude() - 15.1234).abs() < 1e-9);
        assert!((coords.longitude() - 104.5678).abs() < 1e-9);
    }

    #[test]
    fn rejects_missing_longitude() {
        assert!(matches!(
            Coordinates::parse("15.1"),
            Err(CoordinatesError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_extra_parts() {
        assert!(matches!(
            Coordinates::parse("1, 2, 3"),
            Err(CoordinatesError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_and_nan() {
        assert!(Coordinates::parse("north, east").is_err());
        assert!(Coordinates::parse("NaN, 3").is_err());
        assert!(Coordinates::parse("inf, 3").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Coordinates::parse("91, 0"),
            Err(CoordinatesError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(CoordinatesError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn accepts_bounds() {
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }
}
