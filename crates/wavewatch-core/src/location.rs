//! Case-insensitive location matching used to select samples for a query.

use crate::samples::NetworkSample;

/// Returns `true` when `query` appears anywhere in `location`, ignoring case.
///
/// The query is used as given, surrounding whitespace included, so it selects
/// the same rows as `ILIKE '%query%'`. An empty query matches every location.
#[must_use]
pub fn location_matches(query: &str, location: &str) -> bool {
    query.is_empty() || location.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the samples whose location matches `query`, preserving input order.
#[must_use]
pub fn filter_by_location<'a>(samples: &'a [NetworkSample], query: &str) -> Vec<&'a NetworkSample> {
    samples
        .iter()
        .filter(|s| location_matches(query, &s.location))
        .collect()
}
