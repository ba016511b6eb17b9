//! Listing filters applied to the in-memory center list.
//!
//! Facet constraints compare [`normalize`]d keys, so picking the `"Zen"`
//! option also matches centers stored as `"zen"` or `"Zén"`, the same
//! spellings [`crate::facets`] collapsed into that option.

use dharma_gates_center_models::{Center, Facet};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Filter criteria. Empty strings and `None` impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CenterFilter {
    /// Case-insensitive substring of the name or address.
    pub search: String,
    /// Case-insensitive substring of the address.
    pub location: String,
    pub vehicle: String,
    pub center_type: String,
    pub setting: String,
    pub price_model: String,
    pub gender_policy: String,
    /// Matches when any of the center's traditions matches.
    pub tradition: String,
    pub beginner_friendly: Option<bool>,
    pub ordination_possible: Option<bool>,
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

impl CenterFilter {
    fn facet_constraints(&self) -> [(Facet, &str); 6] {
        [
            (Facet::Vehicle, self.vehicle.as_str()),
            (Facet::CenterType, self.center_type.as_str()),
            (Facet::Setting, self.setting.as_str()),
            (Facet::PriceModel, self.price_model.as_str()),
            (Facet::GenderPolicy, self.gender_policy.as_str()),
            (Facet::Tradition, self.tradition.as_str()),
        ]
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `center` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, center: &Center) -> bool {
        let search = self.search.trim();
        if !search.is_empty()
            && !contains_ignore_case(center.name.as_deref(), search)
            && !contains_ignore_case(center.address.as_deref(), search)
        {
            return false;
        }

        let location = self.location.trim();
        if !location.is_empty() && !contains_ignore_case(center.address.as_deref(), location) {
            return false;
        }

        for (facet, wanted) in self.facet_constraints() {
            if wanted.trim().is_empty() {
                continue;
            }
            let key = normalize(wanted);
            if !center
                .facet_values(facet)
                .into_iter()
                .any(|value| normalize(value) == key)
            {
                return false;
            }
        }

        let flags = [
            (self.beginner_friendly, center.beginner_friendly),
            (self.ordination_possible, center.ordination_possible),
        ];
        flags
            .into_iter()
            .all(|(wanted, actual)| wanted.is_none() || wanted == actual)
    }

    /// Returns matching centers in input order.
    #[must_use]
    pub fn apply<'a>(&self, centers: &'a [Center]) -> Vec<&'a Center> {
        centers.iter().filter(|c| self.matches(c)).collect()
    }
}
