//! Country-scoped state/province normalization.
//!
//! Abbreviations are only expanded against the table for the address's
//! country: `"ON"` is Ontario in Canada but is title-cased to `"On"`
//! anywhere else. Tokens that match neither table are title-cased.

use dharma_gates_geography_models::regions::RegionTable;

/// Whether a country string names the United States.
#[must_use]
pub fn is_united_states(country: &str) -> bool {
    let lower = country.to_lowercase();
    lower.contains("united states") || lower.contains("usa") || lower == "us"
}

/// Whether a country string names Canada.
#[must_use]
pub fn is_canada(country: &str) -> bool {
    country.to_lowercase().contains("canada")
}

/// Normalizes a state or province token against `country`.
///
/// Recognized abbreviations expand to the full name, recognized full
/// names are returned in canonical casing, and anything else is
/// title-cased.
#[must_use]
pub fn normalize_state(token: &str, country: &str) -> String {
    let trimmed = token.trim();

    let tables = [
        (is_united_states(country), RegionTable::US),
        (is_canada(country), RegionTable::CANADA),
    ];

    for (applies, table) in tables {
        if !applies {
            continue;
        }
        if let Some(name) = table
            .name_for_abbr(trimmed)
            .or_else(|| table.canonical_name(trimmed))
        {
            return name.to_string();
        }
    }

    title_case(trimmed)
}

/// Uppercases the first letter of every space-separated word and
/// lowercases the rest.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
