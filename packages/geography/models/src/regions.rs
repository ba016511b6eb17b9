//! US state and Canadian province/territory lookup tables.
//!
//! Maps two-letter postal abbreviations to canonical full names for the
//! 50 US states + DC and the 13 Canadian provinces and territories.

/// US postal abbreviations and full names for the 50 states + DC.
pub const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
];

/// Canadian postal abbreviations and full names for the 10 provinces and
/// 3 territories.
pub const CANADIAN_PROVINCES: &[(&str, &str)] = &[
    ("AB", "Alberta"),
    ("BC", "British Columbia"),
    ("MB", "Manitoba"),
    ("NB", "New Brunswick"),
    ("NL", "Newfoundland and Labrador"),
    ("NS", "Nova Scotia"),
    ("ON", "Ontario"),
    ("PE", "Prince Edward Island"),
    ("QC", "Quebec"),
    ("SK", "Saskatchewan"),
    ("NT", "Northwest Territories"),
    ("NU", "Nunavut"),
    ("YT", "Yukon"),
];

/// A country-scoped table of first-level subdivisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionTable {
    entries: &'static [(&'static str, &'static str)],
}

impl RegionTable {
    /// The US state table.
    pub const US: Self = Self {
        entries: US_STATES,
    };

    /// The Canadian province/territory table.
    pub const CANADA: Self = Self {
        entries: CANADIAN_PROVINCES,
    };

    /// Number of regions in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no regions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maps a two-letter abbreviation (any case) to the full region name.
    #[must_use]
    pub fn name_for_abbr(&self, abbr: &str) -> Option<&'static str> {
        let upper = abbr.trim().to_uppercase();
        self.entries
            .iter()
            .find(|(code, _)| *code == upper)
            .map(|(_, name)| *name)
    }

    /// Returns the canonically-cased full name if `name` already spells
    /// out a region of this table (case-insensitive).
    #[must_use]
    pub fn canonical_name(&self, name: &str) -> Option<&'static str> {
        let trimmed = name.trim();
        self.entries
            .iter()
            .find(|(_, full)| full.eq_ignore_ascii_case(trimmed))
            .map(|(_, full)| *full)
    }

    /// Iterates over `(abbreviation, full name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.entries.iter().copied()
    }
}
