#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Buddhist center entity types.
//!
//! A [`Center`] mirrors one row of the `monasteries` table held by the
//! remote datastore. The directory only ever reads the full list; writes
//! (suggestions, moderation) are handed back to the storage layer as
//! plain values.

pub mod coordinates;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use coordinates::{Coordinates, CoordinatesError};

/// A place of Buddhist practice listed in the directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Center {
    /// Row identifier assigned by the datastore.
    pub id: String,
    /// Display name. Rows with a null name sort as the empty string.
    pub name: Option<String>,
    /// Kind of center (e.g. "Monastery", "Retreat Center").
    pub center_type: Option<String>,
    /// Buddhist vehicle (e.g. "Theravada", "Mahayana", "Vajrayana").
    pub vehicle: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    /// Either a composite `displayName|||country|||state` string or a
    /// free-text postal address.
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub beginner_friendly: Option<bool>,
    pub ordination_possible: Option<bool>,
    pub community_size: Option<String>,
    pub dietary_info: Option<String>,
    pub gender_policy: Option<String>,
    pub involvement_method: Option<String>,
    pub length_of_stay: Option<String>,
    pub price_model: Option<String>,
    pub price_details: Option<String>,
    pub setting: Option<String>,
    pub languages_spoken: Option<Vec<String>>,
    pub practices: Option<Vec<String>>,
    pub teachers: Option<Vec<String>>,
    pub traditions: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
    /// Whether the row is a suggestion awaiting moderation.
    pub pending: bool,
}

impl Center {
    /// Name used for display ordering; a missing name is the empty string.
    #[must_use]
    pub fn sort_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Returns the coordinates only when both latitude and longitude are
    /// present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Returns the non-empty values this center carries for `facet`.
    ///
    /// Single-valued facets yield at most one value; [`Facet::Tradition`]
    /// yields every listed tradition.
    #[must_use]
    pub fn facet_values(&self, facet: Facet) -> Vec<&str> {
        fn single(value: Option<&str>) -> Vec<&str> {
            value
                .filter(|v| !v.is_empty())
                .into_iter()
                .collect()
        }

        match facet {
            Facet::Vehicle => single(self.vehicle.as_deref()),
            Facet::CenterType => single(self.center_type.as_deref()),
            Facet::Setting => single(self.setting.as_deref()),
            Facet::PriceModel => single(self.price_model.as_deref()),
            Facet::GenderPolicy => single(self.gender_policy.as_deref()),
            Facet::Tradition => self
                .traditions
                .iter()
                .flatten()
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }
}

/// A filterable scalar attribute of a [`Center`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    Vehicle,
    CenterType,
    Setting,
    PriceModel,
    GenderPolicy,
    Tradition,
}

impl Facet {
    /// Every facet, in filter panel order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Vehicle,
            Self::CenterType,
            Self::Setting,
            Self::PriceModel,
            Self::GenderPolicy,
            Self::Tradition,
        ]
    }
}

/// A new center as submitted through the "suggest a center" form.
///
/// Coordinates arrive as the raw `"lat, lon"` text the user typed; the
/// address is derived later by reverse geocoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterSuggestion {
    pub name: String,
    pub center_type: String,
    pub vehicle: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Raw `"latitude, longitude"` text.
    pub coordinates: String,
    pub beginner_friendly: Option<bool>,
    pub ordination_possible: Option<bool>,
    pub community_size: Option<String>,
    pub dietary_info: Option<String>,
    pub gender_policy: Option<String>,
    pub involvement_method: Option<String>,
    pub length_of_stay: Option<String>,
    pub price_model: Option<String>,
    pub price_details: Option<String>,
    pub setting: Option<String>,
    pub languages_spoken: Option<Vec<String>>,
    pub practices: Option<Vec<String>>,
    pub teachers: Option<Vec<String>>,
    pub traditions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn deserializes_datastore_row() {
        let row = serde_json::json!({
            "id": "b7f4",
            "name": "Abhayagiri",
            "center_type": "Monastery",
            "vehicle": "Theravada",
            "address": "16201 Tomki Rd, Redwood Valley, CA 95470",
            "latitude": 39.26,
            "longitude": -123.16,
            "traditions": ["Thai Forest"],
            "pending": false,
            "unknown_column": 1
        });
        let center: Center = serde_json::from_value(row).unwrap();
        assert_eq!(center.sort_name(), "Abhayagiri");
        assert_eq!(center.coordinates(), Some((39.26, -123.16)));
        assert_eq!(center.facet_values(Facet::Tradition), vec!["Thai Forest"]);
    }

    #[test]
    fn null_name_sorts_as_empty() {
        let center: Center = serde_json::from_value(serde_json::json!({ "name": null })).unwrap();
        assert_eq!(center.sort_name(), "");
    }

    #[test]
    fn coordinates_require_both_halves() {
        let center = Center {
            latitude: Some(10.0),
            ..Center::default()
        };
        assert_eq!(center.coordinates(), None);
    }

    #[test]
    fn empty_facet_values_are_skipped() {
        let center = Center {
            vehicle: Some(String::new()),
            setting: Some("Rural".to_string()),
            traditions: Some(vec![String::new(), "Zen".to_string()]),
            ..Center::default()
        };
        assert!(center.facet_values(Facet::Vehicle).is_empty());
        assert!(center.facet_values(Facet::CenterType).is_empty());
        assert_eq!(center.facet_values(Facet::Setting), vec!["Rural"]);
        assert_eq!(center.facet_values(Facet::Tradition), vec!["Zen"]);
    }

    #[test]
    fn facet_names_round_trip_through_strum() {
        for facet in Facet::all() {
            assert_eq!(Facet::from_str(facet.as_ref()).unwrap(), *facet);
        }
        assert_eq!(Facet::PriceModel.to_string(), "price_model");
    }
}
