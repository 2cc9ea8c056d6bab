//! Geocoding types and traits

use std::future::Future;

use thiserror::Error;

use crate::coord::Coordinate;

/// Errors that can occur during geocoding operations.
///
/// The picker never surfaces these to the user; controllers convert them to
/// "no data" (empty result list, absent place name). They are still typed so
/// embedding applications can log or inspect them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),
    /// Response body was not valid JSON for the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A single forward-search hit, ephemeral and replaced wholesale on each
/// new search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Coordinate of the matched place
    pub coordinate: Coordinate,
    /// Human-readable place name as returned by the service
    pub display_name: String,
}

/// Trait for geocoding services.
///
/// Implementors resolve free-text queries to coordinates and coordinates to
/// place names. Uses non-blocking I/O via async/await; the returned futures
/// are `Send` so controllers can issue lookups from spawned tasks.
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text query to a list of candidate places.
    ///
    /// Results are returned in the service's relevance order and must not be
    /// re-sorted locally.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, GeocodeError>> + Send;

    /// Resolves a coordinate to a place name.
    ///
    /// Returns `Ok(None)` when the service has no name for the coordinate.
    fn reverse(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}
