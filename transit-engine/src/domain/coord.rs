//! Geographic coordinate type.

use std::fmt;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoord {
    reason: &'static str,
}

/// A validated geographic coordinate.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], and both
/// components are finite. This type guarantees that any `Coord` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use transit_engine::domain::Coord;
///
/// let crucero = Coord::new(21.1576, -86.8269).unwrap();
/// assert_eq!(crucero.lat(), 21.1576);
///
/// // Out-of-range latitude is rejected
/// assert!(Coord::new(91.0, 0.0).is_err());
///
/// // Non-finite components are rejected
/// assert!(Coord::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coord {
    lat: f64,
    lon: f64,
}

impl Coord {
    /// Construct a coordinate, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoord> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoord {
                reason: "components must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoord {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Coord { lat, lon })
    }

    /// Returns the latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}
