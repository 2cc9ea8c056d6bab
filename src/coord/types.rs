//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Decimal places used when rendering a coordinate as a textual label.
const LABEL_PRECISION: usize = 4;

/// A geographic coordinate in decimal degrees.
///
/// Immutable value type, compared by exact numeric equality. Two coordinates
/// that differ in any bit of either component are distinct; the picker relies
/// on this for camera-animation de-duplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without range validation.
    ///
    /// Use [`Coordinate::checked`] for values originating outside the picker
    /// (host seeds, responses from untrusted service mirrors).
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, validating both components.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Renders the coordinate as a fixed-precision textual label.
    ///
    /// This is the display-name fallback used at save time when no place
    /// name was ever resolved, e.g. `"12.3457, -98.7654"`.
    pub fn label(&self) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.lat,
            self.lng,
            prec = LABEL_PRECISION
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Errors that can occur when validating a coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside the valid range (-90.0 to 90.0)
    #[error("Invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),
    /// Longitude is outside the valid range (-180.0 to 180.0)
    #[error("Invalid longitude: {0} (must be between {MIN_LNG} and {MAX_LNG})")]
    InvalidLongitude(f64),
}
