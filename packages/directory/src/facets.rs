//! Filter option lists built from near-duplicate facet values.
//!
//! Crowdsourced data spells the same facet several ways (`"Zen"`,
//! `"zen"`, `"Zén"`). Values are grouped under their [`normalize`]d key;
//! the first spelling seen represents the group in the filter UI.

use std::collections::BTreeMap;

use dharma_gates_center_models::{Center, Facet};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Groups values by normalized key.
///
/// Empty values are dropped. Within a group, distinct original spellings
/// are kept in first-seen order.
#[must_use]
pub fn group_similar<'a>(values: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for value in values {
        if value.is_empty() {
            continue;
        }
        let spellings = groups.entry(normalize(value)).or_default();
        if !spellings.iter().any(|s| s == value) {
            spellings.push(value.to_string());
        }
    }

    groups
}

/// Returns one display label per group (its first spelling), sorted.
#[must_use]
pub fn facet_labels<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut labels: Vec<String> = group_similar(values)
        .into_values()
        .filter_map(|spellings| spellings.into_iter().next())
        .collect();
    labels.sort();
    labels
}

/// Display labels for one facet across a list of centers.
#[must_use]
pub fn facet_options(centers: &[Center], facet: Facet) -> Vec<String> {
    facet_labels(centers.iter().flat_map(|c| c.facet_values(facet)))
}

/// Option lists for every filterable facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub available_vehicles: Vec<String>,
    pub available_types: Vec<String>,
    pub available_settings: Vec<String>,
    pub available_price_models: Vec<String>,
    pub available_gender_policies: Vec<String>,
    pub available_traditions: Vec<String>,
}

impl FilterOptions {
    /// Builds every option list from the current center list.
    #[must_use]
    pub fn from_centers(centers: &[Center]) -> Self {
        Self {
            available_vehicles: facet_options(centers, Facet::Vehicle),
            available_types: facet_options(centers, Facet::CenterType),
            available_settings: facet_options(centers, Facet::Setting),
            available_price_models: facet_options(centers, Facet::PriceModel),
            available_gender_policies: facet_options(centers, Facet::GenderPolicy),
            available_traditions: facet_options(centers, Facet::Tradition),
        }
    }

    /// The option list for a single facet.
    #[must_use]
    pub fn options(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Vehicle => &self.available_vehicles,
            Facet::CenterType => &self.available_types,
            Facet::Setting => &self.available_settings,
            Facet::PriceModel => &self.available_price_models,
            Facet::GenderPolicy => &self.available_gender_policies,
            Facet::Tradition => &self.available_traditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_accent_and_case_variants() {
        let groups = group_similar(["Zen", "zen", "Zén"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["zen"], vec!["Zen", "zen", "Zén"]);
    }

    #[test]
    fn drops_empty_and_duplicate_spellings() {
        let groups = group_similar(["", "Pure Land", "Pure Land", "pure land", ""]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["pure land"], vec!["Pure Land", "pure land"]);
    }

    #[test]
    fn first_spelling_represents_group_and_labels_are_sorted() {
        let labels = facet_labels(["zen", "Theravada", "Zen", "theravāda", "Chan"]);
        assert_eq!(labels, vec!["Chan", "Theravada", "zen"]);
    }

    #[test]
    fn builds_all_option_lists() {
        let centers = vec![
            Center {
                vehicle: Some("Mahayana".to_string()),
                center_type: Some("Temple".to_string()),
                traditions: Some(vec!["Zen".to_string(), "Pure Land".to_string()]),
                ..Center::default()
            },
            Center {
                vehicle: Some("mahāyāna".to_string()),
                center_type: Some("Monastery".to_string()),
                setting: Some("Rural".to_string()),
                traditions: Some(vec!["zen".to_string()]),
                ..Center::default()
            },
        ];

        let options = FilterOptions::from_centers(&centers);
        assert_eq!(options.available_vehicles, vec!["Mahayana"]);
        assert_eq!(options.available_types, vec!["Monastery", "Temple"]);
        assert_eq!(options.available_settings, vec!["Rural"]);
        assert!(options.available_price_models.is_empty());
        assert_eq!(options.available_traditions, vec!["Pure Land", "Zen"]);
        assert_eq!(options.options(Facet::Setting), ["Rural".to_string()]);
    }

    #[test]
    fn empty_center_list_has_no_options() {
        assert_eq!(FilterOptions::from_centers(&[]), FilterOptions::default());
    }
}
