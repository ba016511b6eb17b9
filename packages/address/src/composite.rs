//! The composite `displayName|||country|||state` address encoding.
//!
//! Geocoded addresses are persisted in a single text column by joining
//! the geocoder's display name, country and state with [`SEPARATOR`].
//! Field values are not escaped, so a display name that itself contains
//! the separator cannot be decoded back into three parts; such strings
//! decode as [`DecodedAddress::Legacy`].

use dharma_gates_geography_models::GeocodeResult;

/// Field separator of the composite encoding.
pub const SEPARATOR: &str = "|||";

/// The three fields of a composite address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeAddress<'a> {
    /// Full geocoder display name, untrimmed.
    pub display_name: &'a str,
    /// Country, trimmed.
    pub country: &'a str,
    /// State / province, trimmed.
    pub state: &'a str,
}

/// Result of decoding a stored address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedAddress<'a> {
    /// A well-formed three-part composite address.
    Composite(CompositeAddress<'a>),
    /// No separator, or the wrong number of parts. The caller should fall
    /// back to legacy parsing of the raw string.
    Legacy,
}

/// Joins the three fields with [`SEPARATOR`] in fixed order.
#[must_use]
pub fn encode(display_name: &str, country: &str, state: &str) -> String {
    [display_name, country, state].join(SEPARATOR)
}

/// Encodes a geocoding result for storage in the address column.
#[must_use]
pub fn encode_result(result: &GeocodeResult) -> String {
    encode(&result.display_name, &result.country, &result.state)
}

/// Splits a stored address into its three raw, untrimmed fields.
///
/// Returns `None` unless the address has exactly three
/// separator-delimited parts.
#[must_use]
pub fn split(address: &str) -> Option<[&str; 3]> {
    if !address.contains(SEPARATOR) {
        return None;
    }

    let parts: Vec<&str> = address.split(SEPARATOR).collect();
    let &[display_name, country, state] = parts.as_slice() else {
        log::trace!(
            "Composite address has {} parts, treating as legacy: {address:?}",
            parts.len()
        );
        return None;
    };

    Some([display_name, country, state])
}

/// Decodes a stored address.
///
/// Never fails: anything that is not exactly three separator-delimited
/// parts is reported as [`DecodedAddress::Legacy`].
#[must_use]
pub fn decode(address: &str) -> DecodedAddress<'_> {
    let Some([display_name, country, state]) = split(address) else {
        return DecodedAddress::Legacy;
    };

    DecodedAddress::Composite(CompositeAddress {
        display_name,
        country: country.trim(),
        state: state.trim(),
    })
}
