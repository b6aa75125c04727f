//! Candidate enumeration.
//!
//! Direct: one leg on any route serving both endpoints in order.
//! Transfer: two legs through a stop shared by an origin-serving route and
//! a destination-serving route, alight-after-board on the first and
//! board-before-alight on the second.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::{Itinerary, Leg, Route, StopId, TransportType};
use crate::geo::haversine_m;
use crate::resolve::ResolvedAnchor;

use super::config::{LoopPolicy, PlannerConfig};

/// Enumerates itinerary candidates over a catalog snapshot.
pub struct Composer<'a> {
    snapshot: &'a CatalogSnapshot,
    config: &'a PlannerConfig,
}

impl<'a> Composer<'a> {
    /// Create a composer over a snapshot.
    pub fn new(snapshot: &'a CatalogSnapshot, config: &'a PlannerConfig) -> Self {
        Self { snapshot, config }
    }

    /// All direct and single-transfer candidates between two anchors.
    ///
    /// The returned list is unranked and may contain structural duplicates;
    /// see [`super::deduplicate`] and [`super::rank_itineraries`]. An empty
    /// list is a normal outcome on this sparse catalog.
    pub fn compose(
        &self,
        origin: ResolvedAnchor,
        destination: ResolvedAnchor,
        filter: Option<TransportType>,
    ) -> Vec<Itinerary> {
        let mut candidates = self.directs(origin, destination, filter);
        debug!(direct = candidates.len(), "direct enumeration done");

        candidates.extend(self.transfers(origin, destination, filter));
        debug!(total = candidates.len(), "transfer enumeration done");

        candidates
    }

    /// One-leg candidates.
    fn directs(
        &self,
        origin: ResolvedAnchor,
        destination: ResolvedAnchor,
        filter: Option<TransportType>,
    ) -> Vec<Itinerary> {
        self.serving(origin.stop, filter)
            .filter_map(|route| {
                let leg = self.best_leg(route, origin.stop, destination.stop)?;
                Itinerary::new(vec![leg], origin.walk_m, destination.walk_m).ok()
            })
            .collect()
    }

    /// Two-leg candidates through every shared, order-compatible stop.
    fn transfers(
        &self,
        origin: ResolvedAnchor,
        destination: ResolvedAnchor,
        filter: Option<TransportType>,
    ) -> Vec<Itinerary> {
        let mut candidates = Vec::new();

        let dest_routes: Vec<&Route> = self.serving(destination.stop, filter).collect();

        for first in self.serving(origin.stop, filter) {
            for second in &dest_routes {
                if first.id == second.id {
                    continue;
                }

                let second_stops: HashSet<StopId> = second.resolved_stops().collect();
                let mut tried: HashSet<StopId> = HashSet::new();

                for transfer in first.resolved_stops() {
                    if transfer == origin.stop
                        || transfer == destination.stop
                        || !second_stops.contains(&transfer)
                        || !tried.insert(transfer)
                    {
                        continue;
                    }

                    let Some(leg_in) = self.best_leg(first, origin.stop, transfer) else {
                        continue;
                    };
                    let Some(leg_out) = self.best_leg(second, transfer, destination.stop)
                    else {
                        continue;
                    };

                    if let Ok(itinerary) = Itinerary::new(
                        vec![leg_in, leg_out],
                        origin.walk_m,
                        destination.walk_m,
                    ) {
                        candidates.push(itinerary);
                    }
                }
            }
        }

        candidates
    }

    /// Routes serving a stop, restricted to the requested mode.
    fn serving(
        &self,
        stop: StopId,
        filter: Option<TransportType>,
    ) -> impl Iterator<Item = &'a Route> {
        self.snapshot
            .routes()
            .routes_containing(stop)
            .filter(move |route| filter.is_none_or(|mode| route.transport_type == mode))
    }

    /// The shortest valid leg on `route` from `from` to `to`, if any.
    ///
    /// A stop can occur at several positions on a circular route; every
    /// order-compatible (board, alight) position pair is considered and the
    /// shortest ride wins. Under [`LoopPolicy::Wrap`], circular routes also
    /// admit pairs where the alight position precedes the board position,
    /// riding through the end of the sequence and re-entering at the start.
    fn best_leg(&self, route: &Route, from: StopId, to: StopId) -> Option<Leg> {
        if from == to {
            return None;
        }

        let wrap = self.config.loop_policy == LoopPolicy::Wrap && route.is_loop();

        let mut best: Option<f64> = None;
        for board in route.positions_of(from) {
            for alight in route.positions_of(to) {
                let distance = if board < alight {
                    self.ride_distance(route, board, alight)
                } else if wrap {
                    // Through the end of the sequence, then from the start.
                    let last = route.stops.len() - 1;
                    self.ride_distance(route, board, last)
                        + self.ride_distance(route, 0, alight)
                } else {
                    continue;
                };

                if best.is_none_or(|d| distance < d) {
                    best = Some(distance);
                }
            }
        }

        let distance = best?;
        let registry = self.snapshot.registry();
        Some(Leg::new(
            route.id.clone(),
            registry.get(from).name.clone(),
            registry.get(to).name.clone(),
            distance,
        ))
    }

    /// Haversine sum over consecutive resolved stops between two positions.
    ///
    /// Unresolved stops in between are bridged: the distance jumps from the
    /// last resolved stop straight to the next one.
    fn ride_distance(&self, route: &Route, from_pos: usize, to_pos: usize) -> f64 {
        let registry = self.snapshot.registry();
        let mut total = 0.0;
        let mut previous = None;

        for stop_ref in &route.stops[from_pos..=to_pos] {
            let Some(id) = stop_ref.stop else { continue };
            let coord = registry.get(id).coord;
            if let Some(prev) = previous {
                total += haversine_m(prev, coord);
            }
            previous = Some(coord);
        }

        total
    }
}
