//! Heuristic country/state inference for free-text postal addresses.
//!
//! Legacy rows store whatever the submitter typed, e.g.
//! `"123 Main St, Ukiah, CA 95482"` or
//! `"Monastery Rd, Some Town, Ontario, Canada"`. The parser splits on
//! commas, takes the final part as the country (or detects a trailing
//! `"ST 12345"` US state + ZIP), then scans the remaining parts from the
//! right using [`SCAN_RULES`] to find the state.

use std::sync::LazyLock;

use dharma_gates_geography_models::ParsedLocation;
use regex::Regex;

use crate::state::normalize_state;

/// Country assumed when the address ends in a US state + ZIP.
pub const UNITED_STATES: &str = "United States";

/// Two uppercase letters, whitespace, then an ASCII digit (`"CA 95482"`).
static STATE_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\s+[0-9]").expect("valid regex"));

/// Words that mark a part as a locality rather than a state.
static CITY_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(city|town|village|township|borough|district)\b").expect("valid regex")
});

/// Decision for one candidate part during the backward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    /// Not a state; continue with the part to the left.
    Skip,
    /// This is the state token; stop scanning.
    Accept(&'a str),
}

/// A named predicate/action pair evaluated against a candidate part.
pub struct ScanRule {
    /// Short identifier, used in trace logging.
    pub name: &'static str,
    /// Returns `Some` when the rule decides the part.
    pub apply: fn(&str) -> Option<Scan<'_>>,
}

/// Rules in evaluation order. The first rule that returns `Some` wins;
/// the final rule accepts any part.
pub const SCAN_RULES: &[ScanRule] = &[
    ScanRule {
        name: "zip",
        apply: skip_zip,
    },
    ScanRule {
        name: "state-zip",
        apply: accept_state_zip,
    },
    ScanRule {
        name: "city-word",
        apply: skip_city_word,
    },
    ScanRule {
        name: "state",
        apply: accept_part,
    },
];

fn skip_zip(part: &str) -> Option<Scan<'_>> {
    part.starts_with(|c: char| c.is_ascii_digit())
        .then_some(Scan::Skip)
}

fn accept_state_zip(part: &str) -> Option<Scan<'_>> {
    STATE_ZIP_RE
        .is_match(part)
        .then(|| Scan::Accept(leading_token(part)))
}

fn skip_city_word(part: &str) -> Option<Scan<'_>> {
    CITY_WORD_RE.is_match(part).then_some(Scan::Skip)
}

#[allow(clippy::unnecessary_wraps)]
const fn accept_part(part: &str) -> Option<Scan<'_>> {
    Some(Scan::Accept(part))
}

fn leading_token(part: &str) -> &str {
    part.split_whitespace().next().unwrap_or(part)
}

/// Runs [`SCAN_RULES`] against a single part.
#[must_use]
pub fn classify(part: &str) -> Scan<'_> {
    for rule in SCAN_RULES {
        if let Some(scan) = (rule.apply)(part) {
            log::trace!("Address part {part:?} decided by rule '{}'", rule.name);
            return scan;
        }
    }
    Scan::Skip
}

/// Infers country and state from a free-text address.
///
/// Returns `None` when the address is empty, has fewer than two
/// comma-separated parts, names no country, or has no part that can
/// serve as a state.
#[must_use]
pub fn parse(address: Option<&str>) -> Option<ParsedLocation> {
    let address = address.map(str::trim).filter(|a| !a.is_empty())?;

    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    let (&last, rest) = parts.split_last()?;
    if rest.is_empty() {
        return None;
    }

    if STATE_ZIP_RE.is_match(last) {
        let state = normalize_state(leading_token(last), UNITED_STATES);
        return Some(ParsedLocation::new(UNITED_STATES, state));
    }

    let country = last;
    if country.is_empty() {
        log::trace!("Legacy address has an empty country part: {address:?}");
        return None;
    }

    let state = rest.iter().rev().find_map(|part| match classify(part) {
        Scan::Skip => None,
        Scan::Accept(token) => Some(token),
    });

    let Some(state) = state.filter(|s| !s.is_empty()) else {
        log::trace!("No state found in legacy address: {address:?}");
        return None;
    };

    Some(ParsedLocation::new(country, normalize_state(state, country)))
}
