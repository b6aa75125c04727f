//! Itinerary types.
//!
//! An `Itinerary` is a complete trip from origin to destination: one or two
//! route legs plus the walking distances at each end. It is a transient,
//! per-query value - created by the planner, serialized by the façade, and
//! never persisted.

use super::{DomainError, RouteId};

/// One ride on a single route, from boarding stop to alighting stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Route ridden.
    pub route: RouteId,

    /// Boarding stop name.
    pub board: String,

    /// Alighting stop name.
    pub alight: String,

    /// In-route distance from board to alight, in meters.
    pub distance_m: f64,
}

impl Leg {
    /// Create a new leg.
    pub fn new(
        route: RouteId,
        board: impl Into<String>,
        alight: impl Into<String>,
        distance_m: f64,
    ) -> Self {
        Self {
            route,
            board: board.into(),
            alight: alight.into(),
            distance_m,
        }
    }
}

/// A ranked trip candidate: route legs plus last-mile walks.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs meet at a common stop (the transfer point)
/// - All distances are finite and non-negative
///
/// `total_distance_m` is computed once at construction and never drifts
/// from the legs it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Leg>,
    last_mile_origin_m: f64,
    last_mile_destination_m: f64,
    total_distance_m: f64,
}

impl Itinerary {
    /// Construct an itinerary, validating leg chaining and distances.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg list is empty, if consecutive legs do not
    /// share a transfer stop, or if any distance is negative or non-finite.
    pub fn new(
        legs: Vec<Leg>,
        last_mile_origin_m: f64,
        last_mile_destination_m: f64,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for walk in [last_mile_origin_m, last_mile_destination_m] {
            if !walk.is_finite() || walk < 0.0 {
                return Err(DomainError::InvalidDistance(
                    "last-mile walk must be finite and non-negative",
                ));
            }
        }

        let mut total = last_mile_origin_m + last_mile_destination_m;
        for leg in &legs {
            if !leg.distance_m.is_finite() || leg.distance_m < 0.0 {
                return Err(DomainError::InvalidDistance(
                    "leg distance must be finite and non-negative",
                ));
            }
            total += leg.distance_m;
        }

        for pair in legs.windows(2) {
            if pair[0].alight != pair[1].board {
                return Err(DomainError::LegsNotConnected(
                    pair[0].alight.clone(),
                    pair[1].board.clone(),
                ));
            }
        }

        Ok(Self {
            legs,
            last_mile_origin_m,
            last_mile_destination_m,
            total_distance_m: total,
        })
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Walking distance from the requested origin to the first boarding stop.
    pub fn last_mile_origin_m(&self) -> f64 {
        self.last_mile_origin_m
    }

    /// Walking distance from the final alighting stop to the requested destination.
    pub fn last_mile_destination_m(&self) -> f64 {
        self.last_mile_destination_m
    }

    /// Total distance: both last-mile walks plus all in-route legs.
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Number of transfers (legs minus one).
    pub fn transfer_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// The transfer stop name, for two-leg itineraries.
    pub fn transfer_stop(&self) -> Option<&str> {
        (self.legs.len() > 1).then(|| self.legs[1].board.as_str())
    }

    /// Route ids in travel order, for deterministic tie-breaking.
    pub fn route_ids(&self) -> impl Iterator<Item = &RouteId> {
        self.legs.iter().map(|leg| &leg.route)
    }
}
