//! Pinpoint - interactive map location picker
//!
//! This library implements the state and concurrency core of a modal
//! location-selection workflow: the user picks a geographic coordinate by
//! clicking a map or by free-text place search, while a debounced background
//! lookup derives a human-readable name for whatever coordinate is pinned.
//!
//! The map widget and the rendering layer stay host-side behind small
//! traits; the library owns the selection model, the debounce scheduler,
//! the search and camera controllers, and the session lifecycle.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use pinpoint::geocode::{GeocoderConfig, NominatimGeocoder, ReqwestClient};
//! use pinpoint::session::{ModalSession, NoopPageEffects, SessionConfig};
//!
//! let geocoder = Arc::new(NominatimGeocoder::new(
//!     ReqwestClient::new()?,
//!     GeocoderConfig::default(),
//! ));
//! let session = ModalSession::open(
//!     geocoder,
//!     map,            // your MapCamera implementation
//!     Arc::new(NoopPageEffects),
//!     host,           // your SessionHost implementation
//!     None,           // optional seed coordinate
//!     SessionConfig::default(),
//! );
//! session.run(events_rx, shutdown).await;
//! ```

pub mod camera;
pub mod coord;
pub mod geocode;
pub mod logging;
pub mod scheduler;
pub mod search;
pub mod selection;
pub mod session;

/// Version of the pinpoint library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
