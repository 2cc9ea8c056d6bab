//! Geocoding service abstraction
//!
//! This module provides traits and implementations for resolving free-text
//! place queries to coordinates (forward geocoding) and coordinates to
//! human-readable place names (reverse geocoding).
//!
//! The default implementation targets a Nominatim-style HTTP JSON API. The
//! HTTP layer is injectable for testing:
//!
//! ```ignore
//! use pinpoint::geocode::{GeocoderConfig, NominatimGeocoder, ReqwestClient};
//!
//! let client = ReqwestClient::new()?;
//! let geocoder = NominatimGeocoder::new(client, GeocoderConfig::default());
//! ```

mod http;
#[cfg(test)]
pub mod mock;
mod nominatim;
mod types;

pub use http::{AsyncHttpClient, ReqwestClient};
pub use nominatim::{GeocoderConfig, NominatimGeocoder};
pub use types::{GeocodeError, Geocoder, SearchResult};

#[cfg(test)]
pub use http::tests::MockHttpClient;
