#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Directory listing logic for Buddhist centers.
//!
//! Everything here is computed on demand from the full center list:
//!
//! - [`normalize`] and [`facets`] collapse near-duplicate facet values
//!   into filter options.
//! - [`filter`] applies the listing filters.
//! - [`grouping`] builds the country → state → center listing.
//! - [`submission`] turns a "suggest a center" form into a pending center.
//!
//! No module keeps state between calls; callers decide what to memoize.

pub mod facets;
pub mod filter;
pub mod grouping;
pub mod normalize;
pub mod submission;

pub use facets::{FilterOptions, facet_labels, group_similar};
pub use filter::CenterFilter;
pub use grouping::{CountryOrder, GroupedListing, Listing, group_by_location};
pub use normalize::normalize;
