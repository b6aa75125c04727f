//! Great-circle distance.
//!
//! All distances in the engine come through [`haversine_m`]. Haversine was
//! chosen over the cheaper equirectangular approximation: the bundled
//! catalog spans Cancún down to Playa del Carmen (~70 km), which is past
//! the range where the two formulas agree, and the catalog is small enough
//! that the extra trigonometry is free in practice.

use crate::domain::Coord;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_m(a: Coord, b: Coord) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let delta_phi = (b.lat() - a.lat()).to_radians();
    let delta_lambda = (b.lon() - a.lon()).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
