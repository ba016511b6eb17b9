//! Country → state → center grouping for the sectioned listing.
//!
//! The grouping is rebuilt from scratch on every call and holds only
//! borrows of the input, so it is safe to recompute whenever the list
//! changes.

use std::collections::BTreeMap;

use dharma_gates_address::resolve_location;
use dharma_gates_center_models::Center;
use serde::{Deserialize, Serialize};

/// Country pinned to the top of the listing by default.
pub const DEFAULT_PINNED_COUNTRY: &str = "United States";

/// Something that can be placed in the listing.
pub trait Listing {
    /// Name used to order entries within a section.
    fn listing_name(&self) -> &str;

    /// Stored address, composite or legacy.
    fn listing_address(&self) -> Option<&str>;
}

impl Listing for Center {
    fn listing_name(&self) -> &str {
        self.sort_name()
    }

    fn listing_address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// How top-level countries are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "country", rename_all = "snake_case")]
pub enum CountryOrder {
    /// This country first (when present), the rest alphabetically.
    Pinned(String),
    /// The country with the most entries first (ties broken
    /// alphabetically), the rest alphabetically.
    MostFrequent,
}

impl Default for CountryOrder {
    fn default() -> Self {
        Self::Pinned(DEFAULT_PINNED_COUNTRY.to_string())
    }
}

impl CountryOrder {
    /// Parses a setting value: `"auto"` selects [`Self::MostFrequent`],
    /// blank selects the default, anything else pins that country.
    #[must_use]
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "" => Self::default(),
            v if v.eq_ignore_ascii_case("auto") => Self::MostFrequent,
            v => Self::Pinned(v.to_string()),
        }
    }
}

/// Entries grouped by resolved location.
#[derive(Debug)]
pub struct GroupedListing<'a, T> {
    /// Country → state → entries sorted by name.
    pub tree: BTreeMap<String, BTreeMap<String, Vec<&'a T>>>,
    /// Entries whose address could not be resolved, sorted by name.
    pub unparseable: Vec<&'a T>,
}

/// One state section of an ordered listing.
#[derive(Debug)]
pub struct StateSection<'g, 'a, T> {
    pub state: &'g str,
    pub entries: &'g [&'a T],
}

/// One country section of an ordered listing.
#[derive(Debug)]
pub struct CountrySection<'g, 'a, T> {
    pub country: &'g str,
    pub states: Vec<StateSection<'g, 'a, T>>,
}

fn sort_by_name<T: Listing>(entries: &mut [&T]) {
    entries.sort_by(|a, b| a.listing_name().cmp(b.listing_name()));
}

/// Groups entries by the country and state of their address.
///
/// Entries whose address resolves go into `tree[country][state]`; the
/// rest go into `unparseable`. Every list is sorted by name (stable, so
/// equal names keep input order).
#[must_use]
pub fn group_by_location<T: Listing>(entries: &[T]) -> GroupedListing<'_, T> {
    let mut tree: BTreeMap<String, BTreeMap<String, Vec<&T>>> = BTreeMap::new();
    let mut unparseable = Vec::new();

    for entry in entries {
        match resolve_location(entry.listing_address()) {
            Some(location) => tree
                .entry(location.country)
                .or_default()
                .entry(location.state)
                .or_default()
                .push(entry),
            None => unparseable.push(entry),
        }
    }

    for states in tree.values_mut() {
        for list in states.values_mut() {
            sort_by_name(list);
        }
    }
    sort_by_name(&mut unparseable);

    GroupedListing { tree, unparseable }
}

impl<'a, T> GroupedListing<'a, T> {
    /// Country keys in display order.
    #[must_use]
    pub fn countries(&self, order: &CountryOrder) -> Vec<&str> {
        let pinned = match order {
            CountryOrder::Pinned(country) => Some(country.as_str()),
            CountryOrder::MostFrequent => self.most_frequent_country(),
        };

        let mut countries: Vec<&str> = self.tree.keys().map(String::as_str).collect();
        if let Some(pinned) = pinned
            && let Some(idx) = countries.iter().position(|c| *c == pinned)
        {
            let country = countries.remove(idx);
            countries.insert(0, country);
        }
        countries
    }

    /// The country with the most entries; ties go to the alphabetically
    /// first country.
    #[must_use]
    pub fn most_frequent_country(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (country, states) in &self.tree {
            let count: usize = states.values().map(Vec::len).sum();
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((country, count));
            }
        }
        best.map(|(country, _)| country)
    }

    /// The full listing in display order: countries per `order`, states
    /// alphabetically.
    #[must_use]
    pub fn sections(&self, order: &CountryOrder) -> Vec<CountrySection<'_, 'a, T>> {
        self.countries(order)
            .into_iter()
            .filter_map(|country| {
                let (country, states) = self.tree.get_key_value(country)?;
                Some(CountrySection {
                    country,
                    states: states
                        .iter()
                        .map(|(state, entries)| StateSection {
                            state,
                            entries,
                        })
                        .collect(),
                })
            })
            .collect()
    }

    /// Number of entries that resolved to a location.
    #[must_use]
    pub fn located_len(&self) -> usize {
        self.tree
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Total number of entries, including unparseable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.located_len() + self.unparseable.len()
    }

    /// Whether no entries were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.unparseable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(name: &str, address: &str) -> Center {
        Center {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
            ..Center::default()
        }
    }

    fn names<T: Listing>(entries: &[&T]) -> Vec<String> {
        entries.iter().map(|e| e.listing_name().to_string()).collect()
    }

    #[test]
    fn sorts_within_state_and_separates_unparseable() {
        let centers = vec![
            center("B", "Somewhere|||USA|||Texas"),
            center("A", "Elsewhere|||USA|||Texas"),
            center("X", "garbage"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(names(&grouped.tree["USA"]["Texas"]), vec!["A", "B"]);
        assert_eq!(names(&grouped.unparseable), vec!["X"]);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped.located_len(), 2);
    }

    #[test]
    fn mixes_composite_and_legacy_addresses() {
        let centers = vec![
            center("Abhayagiri", "16201 Tomki Rd, Redwood Valley, CA 95470"),
            center("Gold Mountain", "x|||United States|||California"),
            center("Birken", "Knutsford, British Columbia, Canada"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(
            names(&grouped.tree["United States"]["California"]),
            vec!["Abhayagiri", "Gold Mountain"]
        );
        assert_eq!(names(&grouped.tree["Canada"]["British Columbia"]), vec!["Birken"]);
        assert!(grouped.unparseable.is_empty());
    }

    #[test]
    fn missing_address_and_name() {
        let centers = vec![
            Center {
                name: Some("Zeta".to_string()),
                ..Center::default()
            },
            Center::default(),
        ];

        let grouped = group_by_location(&centers);

        assert!(grouped.tree.is_empty());
        assert_eq!(names(&grouped.unparseable), vec!["", "Zeta"]);
    }

    #[test]
    fn pinned_country_comes_first() {
        let centers = vec![
            center("1", "a|||Australia|||Victoria"),
            center("2", "a|||Thailand|||Ubon"),
            center("3", "a|||United States|||Oregon"),
            center("4", "a|||Canada|||Ontario"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(
            grouped.countries(&CountryOrder::default()),
            vec!["United States", "Australia", "Canada", "Thailand"]
        );
    }

    #[test]
    fn absent_pinned_country_is_plain_alphabetical() {
        let centers = vec![
            center("1", "a|||Thailand|||Ubon"),
            center("2", "a|||Canada|||Ontario"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(
            grouped.countries(&CountryOrder::default()),
            vec!["Canada", "Thailand"]
        );
    }

    #[test]
    fn most_frequent_country_is_pinned_when_data_driven() {
        let centers = vec![
            center("1", "a|||Canada|||Ontario"),
            center("2", "a|||Thailand|||Ubon"),
            center("3", "a|||Thailand|||Chiang Mai"),
            center("4", "a|||United States|||Oregon"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(grouped.most_frequent_country(), Some("Thailand"));
        assert_eq!(
            grouped.countries(&CountryOrder::MostFrequent),
            vec!["Thailand", "Canada", "United States"]
        );
    }

    #[test]
    fn most_frequent_tie_goes_to_alphabetically_first() {
        let centers = vec![
            center("1", "a|||Nepal|||Bagmati"),
            center("2", "a|||India|||Bihar"),
        ];

        let grouped = group_by_location(&centers);

        assert_eq!(grouped.most_frequent_country(), Some("India"));
    }

    #[test]
    fn sections_follow_display_order() {
        let centers = vec![
            center("Spirit Rock", "a|||United States|||California"),
            center("IMS", "a|||United States|||Massachusetts"),
            center("Dhamma Giri", "a|||India|||Maharashtra"),
        ];

        let grouped = group_by_location(&centers);
        let sections = grouped.sections(&CountryOrder::default());

        let layout: Vec<(&str, Vec<&str>)> = sections
            .iter()
            .map(|s| (s.country, s.states.iter().map(|st| st.state).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("United States", vec!["California", "Massachusetts"]),
                ("India", vec!["Maharashtra"]),
            ]
        );
        assert_eq!(names(sections[0].states[1].entries), vec!["IMS"]);
    }

    #[test]
    fn parses_country_order_setting() {
        assert_eq!(CountryOrder::from_setting("AUTO"), CountryOrder::MostFrequent);
        assert_eq!(CountryOrder::from_setting("  "), CountryOrder::default());
        assert_eq!(
            CountryOrder::from_setting("Thailand"),
            CountryOrder::Pinned("Thailand".to_string())
        );
    }

    #[test]
    fn empty_input() {
        let grouped = group_by_location::<Center>(&[]);
        assert!(grouped.is_empty());
        assert!(grouped.countries(&CountryOrder::MostFrequent).is_empty());
    }
}
