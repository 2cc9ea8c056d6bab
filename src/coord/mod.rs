//! Geographic coordinate module
//!
//! Provides the [`Coordinate`] value type used throughout the picker, plus
//! validation for coordinates constructed from untrusted host input.

mod types;

pub use types::{CoordError, Coordinate, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
