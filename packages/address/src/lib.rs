#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address handling for the Dharma Gates directory.
//!
//! Stored center addresses come in two shapes:
//!
//! - **Composite** strings written after geocoding,
//!   `displayName|||country|||state` (see [`composite`]).
//! - **Legacy** free-text postal addresses entered before geocoding was
//!   introduced, which are parsed heuristically (see [`legacy`]).
//!
//! [`resolve_location`] tries the composite fast path first and falls
//! back to legacy parsing. Nothing in this crate performs I/O or returns
//! errors; an address that cannot be resolved yields `None`.

pub mod composite;
pub mod legacy;
pub mod state;

use dharma_gates_geography_models::ParsedLocation;

pub use composite::{CompositeAddress, DecodedAddress, SEPARATOR, decode, encode, encode_result};

/// Placeholder for a composite field that holds only whitespace.
pub const UNKNOWN: &str = "Unknown";

fn or_unknown(field: &str) -> &str {
    let field = field.trim();
    if field.is_empty() { UNKNOWN } else { field }
}
pub use state::normalize_state;

/// Resolves a stored address to a country/state pair.
///
/// A composite address whose country and state fields are both non-empty
/// is used as is, with a whitespace-only field reported as [`UNKNOWN`].
///
/// When either field is empty the display name is parsed as legacy text.
/// A non-blank stored country is kept over the parsed one; the parsed
/// state is renormalized against it, or [`UNKNOWN`] if parsing fails.
///
/// Anything that is not a three-part composite is parsed as legacy text.
#[must_use]
pub fn resolve_location(address: Option<&str>) -> Option<ParsedLocation> {
    let address = address?;

    let Some([display_name, country, state]) = composite::split(address) else {
        return legacy::parse(Some(address));
    };

    if !country.is_empty() && !state.is_empty() {
        return Some(ParsedLocation::new(or_unknown(country), or_unknown(state)));
    }

    log::trace!("Composite address lacks country or state, parsing display name");
    let parsed = legacy::parse(Some(display_name));

    let country = country.trim();
    if country.is_empty() {
        return parsed;
    }

    let state = parsed.map_or_else(
        || UNKNOWN.to_string(),
        |location| normalize_state(&location.state, country),
    );
    Some(ParsedLocation::new(country, state))
}
