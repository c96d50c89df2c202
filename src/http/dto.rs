//! Data Transfer Objects for the HTTP API.
//!
//! Catalog records serialize straight from [`crate::api::CelestialBody`];
//! this module holds the query-parameter structs and the responses that
//! have no domain counterpart.

use serde::Deserialize;

pub use crate::api::{PodNameResponse, POD_NAME_SENTINEL};

/// Fixed client-facing messages. Tests assert on these verbatim.
pub const INVALID_RANGE_MESSAGE: &str =
    "Invalid start or end parameters. Must be non-negative integers where end > start.";
pub const MISSING_NAME_MESSAGE: &str = "Please provide a planet name to search.";
pub const API_NOT_FOUND_MESSAGE: &str = "API endpoint not found.";
pub const FETCH_FAILED_MESSAGE: &str = "Server error while fetching planets.";
pub const SEARCH_FAILED_MESSAGE: &str = "Server error while searching planets.";

/// Query parameters for the list/slice endpoint.
///
/// Both fields deserialize as raw strings so validation failures produce the
/// fixed message above rather than a framework rejection.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RangeQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl RangeQuery {
    /// Validate the pair and resolve it to a half-open window.
    ///
    /// * Both absent: `Ok(None)` (full catalog).
    /// * Both present, numeric, `0 <= start < end`: `Ok(Some((start, end)))`.
    /// * Anything else, including exactly one parameter present: `Err(())`.
    pub fn window(&self) -> Result<Option<(usize, usize)>, ()> {
        match (&self.start, &self.end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let start: i64 = start.trim().parse().map_err(|_| ())?;
                let end: i64 = end.trim().parse().map_err(|_| ())?;
                if start < 0 || end <= start {
                    return Err(());
                }
                Ok(Some((start as usize, end as usize)))
            }
            _ => Err(()),
        }
    }
}

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: Option<String>,
}
