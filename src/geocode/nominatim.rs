//! Nominatim-style geocoding client.
//!
//! Speaks the JSON API exposed by <https://nominatim.openstreetmap.org> and
//! compatible self-hosted instances. Search hits carry `lat`/`lon` as strings
//! in the wire format; they are parsed here and hits with unparsable
//! coordinates are skipped rather than failing the whole response.

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::AsyncHttpClient;
use super::types::{GeocodeError, Geocoder, SearchResult};
use crate::coord::Coordinate;

/// Configuration for the Nominatim geocoder.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim instance, without a trailing slash.
    pub base_url: String,
    /// Maximum number of forward-search hits to request.
    pub search_limit: usize,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            search_limit: 5,
        }
    }
}

/// Wire format of a forward-search hit.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// Wire format of a reverse-lookup reply.
#[derive(Debug, Deserialize)]
struct ReverseReply {
    display_name: Option<String>,
}

/// Geocoder implementation over a Nominatim-style HTTP API.
pub struct NominatimGeocoder<C: AsyncHttpClient> {
    client: C,
    config: GeocoderConfig,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    /// Creates a new geocoder over the given HTTP client.
    pub fn new(client: C, config: GeocoderConfig) -> Self {
        Self { client, config }
    }

    fn search_url(&self, query: &str) -> Result<String, GeocodeError> {
        let limit = self.config.search_limit.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.config.base_url),
            &[("format", "json"), ("limit", &limit), ("q", query)],
        )
        .map_err(|e| GeocodeError::Http(format!("Invalid search URL: {}", e)))?;
        Ok(url.into())
    }

    fn reverse_url(&self, coordinate: Coordinate) -> Result<String, GeocodeError> {
        let lat = coordinate.lat.to_string();
        let lng = coordinate.lng.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/reverse", self.config.base_url),
            &[("format", "json"), ("lat", &lat), ("lon", &lng)],
        )
        .map_err(|e| GeocodeError::Http(format!("Invalid reverse URL: {}", e)))?;
        Ok(url.into())
    }
}

impl<C: AsyncHttpClient> Geocoder for NominatimGeocoder<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        let url = self.search_url(query)?;
        let body = self.client.get(&url).await?;

        let hits: Vec<SearchHit> = serde_json::from_slice(&body)
            .map_err(|e| GeocodeError::InvalidResponse(format!("Search response: {}", e)))?;

        // Preserve service order; skip hits with unparsable coordinates.
        let results: Vec<SearchResult> = hits
            .into_iter()
            .filter_map(|hit| {
                let lat: f64 = match hit.lat.parse() {
                    Ok(v) => v,
                    Err(_) => {
                        warn!(lat = %hit.lat, "Skipping search hit with unparsable latitude");
                        return None;
                    }
                };
                let lng: f64 = match hit.lon.parse() {
                    Ok(v) => v,
                    Err(_) => {
                        warn!(lon = %hit.lon, "Skipping search hit with unparsable longitude");
                        return None;
                    }
                };
                Some(SearchResult {
                    coordinate: Coordinate::new(lat, lng),
                    display_name: hit.display_name,
                })
            })
            .collect();

        debug!(query = query, hits = results.len(), "Forward search completed");
        Ok(results)
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, GeocodeError> {
        let url = self.reverse_url(coordinate)?;
        let body = self.client.get(&url).await?;

        // Nominatim reports "unable to geocode" as an error object without a
        // display_name; treat any shape without one as "no name".
        let reply: ReverseReply = serde_json::from_slice(&body)
            .map_err(|e| GeocodeError::InvalidResponse(format!("Reverse response: {}", e)))?;

        let name = reply.display_name.filter(|n| !n.is_empty());
        debug!(
            lat = coordinate.lat,
            lng = coordinate.lng,
            resolved = name.is_some(),
            "Reverse lookup completed"
        );
        Ok(name)
    }
}
