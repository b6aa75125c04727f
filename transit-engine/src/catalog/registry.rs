//! Stop registry: name lookup and proximity search.

use std::collections::HashMap;

use crate::domain::{Coord, Stop, StopId};
use crate::geo::haversine_m;

/// The merged stop name → coordinate mapping.
///
/// Stops live in an arena indexed by [`StopId`]; a lowercased-name map
/// provides case-insensitive lookup. Built once at snapshot construction,
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
    by_name: HashMap<String, StopId>,
}

impl StopRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stop, or update the coordinate if the name (compared
    /// case-insensitively) is already present. Later entries win.
    pub(super) fn insert(&mut self, name: &str, coord: Coord) -> StopId {
        let key = name.to_lowercase();
        match self.by_name.get(&key) {
            Some(&id) => {
                let stop = &mut self.stops[id.0];
                stop.name = name.to_string();
                stop.coord = coord;
                id
            }
            None => {
                let id = StopId(self.stops.len());
                self.stops.push(Stop::new(name, coord));
                self.by_name.insert(key, id);
                id
            }
        }
    }

    /// Look up a stop by name, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&Stop> {
        self.id_of(name).map(|id| self.get(id))
    }

    /// Look up a stop's id by name, case-insensitively.
    pub fn id_of(&self, name: &str) -> Option<StopId> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Returns the stop at `id`.
    ///
    /// `StopId`s are only handed out by this registry, so the index is
    /// always in bounds.
    pub fn get(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// Iterate over all stops with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }

    /// Number of registered stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True if no stops are registered.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops within `max_radius_m` meters of `coord`, nearest first.
    ///
    /// Ties are broken by stop name, ascending lexicographically, so the
    /// ordering is fully deterministic. The catalog is a few hundred stops
    /// at most, so this is a plain scan.
    pub fn nearest(&self, coord: Coord, max_radius_m: f64) -> Vec<(StopId, f64)> {
        let mut hits: Vec<(StopId, f64)> = self
            .iter()
            .map(|(id, stop)| (id, haversine_m(coord, stop.coord)))
            .filter(|(_, d)| *d <= max_radius_m)
            .collect();

        hits.sort_by(|(a_id, a_d), (b_id, b_d)| {
            a_d.total_cmp(b_d)
                .then_with(|| self.get(*a_id).name.cmp(&self.get(*b_id).name))
        });

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coord {
        Coord::new(lat, lon).unwrap()
    }

    fn registry() -> StopRegistry {
        let mut r = StopRegistry::new();
        r.insert("El Crucero", coord(21.1576, -86.8269));
        r.insert("Av. Kabah", coord(21.16, -86.845));
        r.insert("Zona Hotelera", coord(21.135, -86.768));
        r
    }

    #[test]
    fn lookup_returns_registered_coordinate() {
        let r = registry();
        let stop = r.lookup("El Crucero").unwrap();
        assert_eq!(stop.coord, coord(21.1576, -86.8269));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let r = registry();
        assert!(r.lookup("el crucero").is_some());
        assert!(r.lookup("EL CRUCERO").is_some());
        assert!(r.lookup("El Cruzero").is_none());
    }

    #[test]
    fn later_insert_overwrites() {
        let mut r = registry();
        let original = r.id_of("Av. Kabah").unwrap();
        let updated = r.insert("Av. Kabah", coord(21.161, -86.846));

        // Same arena slot, new coordinate.
        assert_eq!(original, updated);
        assert_eq!(r.lookup("Av. Kabah").unwrap().coord, coord(21.161, -86.846));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn nearest_orders_by_distance() {
        let r = registry();
        // Just east of El Crucero.
        let from = coord(21.1576, -86.826);

        let hits = r.nearest(from, 5_000.0);
        assert_eq!(hits.len(), 2); // Zona Hotelera is out of range
        assert_eq!(r.get(hits[0].0).name, "El Crucero");
        assert_eq!(r.get(hits[1].0).name, "Av. Kabah");
        assert!(hits[0].1 < hits[1].1);
    }

    #[test]
    fn nearest_respects_radius() {
        let r = registry();
        let from = coord(21.1576, -86.8269);

        let hits = r.nearest(from, 10.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(r.get(hits[0].0).name, "El Crucero");
    }

    #[test]
    fn nearest_empty_when_nothing_in_range() {
        let r = registry();
        // Mérida: ~300 km away.
        assert!(r.nearest(coord(20.97, -89.62), 2_000.0).is_empty());
    }

    #[test]
    fn nearest_ties_break_by_name() {
        let mut r = StopRegistry::new();
        // Two stops at the same point.
        r.insert("B stop", coord(21.0, -86.0));
        r.insert("A stop", coord(21.0, -86.0));

        let hits = r.nearest(coord(21.0, -86.0), 1_000.0);
        assert_eq!(r.get(hits[0].0).name, "A stop");
        assert_eq!(r.get(hits[1].0).name, "B stop");
    }
}
