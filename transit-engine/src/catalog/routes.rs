//! Route catalog: route lookup and the stop → routes inverted index.

use std::collections::HashMap;

use crate::domain::{Route, RouteId, StopId};

/// All routes in the catalog, with precomputed membership indexes.
///
/// Stop membership is resolved to an inverted index once at build time,
/// so queries never join on stop names.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    by_id: HashMap<RouteId, usize>,
    by_stop: HashMap<StopId, Vec<usize>>,
}

impl RouteCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Returns `false` (and keeps the existing route) if the
    /// id is already present.
    pub(super) fn insert(&mut self, route: Route) -> bool {
        if self.by_id.contains_key(&route.id) {
            return false;
        }

        let idx = self.routes.len();
        self.by_id.insert(route.id.clone(), idx);
        for stop in route.resolved_stops() {
            let members = self.by_stop.entry(stop).or_default();
            // A loop route lists a stop twice; index it once.
            if members.last() != Some(&idx) {
                members.push(idx);
            }
        }
        self.routes.push(route);
        true
    }

    /// Look up a route by id.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.by_id.get(&RouteId::from(id)).map(|&i| &self.routes[i])
    }

    /// Routes whose stop sequence contains `stop`, in catalog order.
    pub fn routes_containing(&self, stop: StopId) -> impl Iterator<Item = &Route> {
        self.by_stop
            .get(&stop)
            .into_iter()
            .flatten()
            .map(|&i| &self.routes[i])
    }

    /// Iterate over all routes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the catalog holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
