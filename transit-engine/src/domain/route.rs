//! Route types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;

/// Unique identifier of a route in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Mode of transport served by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Bus,
    Combi,
    Van,
    Ferry,
    /// Absent or unrecognized mode in the source data.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransportType {
    /// Parse a mode name, case-insensitively.
    ///
    /// Returns `None` for names that don't denote a known mode.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bus" => Some(TransportType::Bus),
            "combi" => Some(TransportType::Combi),
            "van" => Some(TransportType::Van),
            "ferry" => Some(TransportType::Ferry),
            _ => None,
        }
    }

    /// Returns the lowercase mode name, or the empty string for `Unknown`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Bus => "bus",
            TransportType::Combi => "combi",
            TransportType::Van => "van",
            TransportType::Ferry => "ferry",
            TransportType::Unknown => "",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stop entry in a route's sequence.
///
/// Routes reference stops by name in the source data; the reference is
/// resolved to a registry index at catalog build time. A name absent from
/// the registry leaves `stop` as `None` - the route still loads, but that
/// position never matches a query endpoint.
#[derive(Debug, Clone)]
pub struct StopRef {
    /// Stop name as written in the route's stop list.
    pub name: String,

    /// Resolved registry index, if the name is known.
    pub stop: Option<StopId>,
}

/// An ordered, directional sequence of stops served by one operator/mode.
///
/// Order is significant: it encodes direction of travel. A route carries
/// passengers forward along its listed stop order only; see the planner's
/// loop policy for circular routes.
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique route identifier.
    pub id: RouteId,

    /// Human-readable route name.
    pub name: String,

    /// Operating company, possibly empty.
    pub operator: String,

    /// Mode of transport.
    pub transport_type: TransportType,

    /// Fare in local currency.
    pub price: f64,

    /// Stop sequence in travel order. Never empty.
    pub stops: Vec<StopRef>,
}

impl Route {
    /// Positions in the stop sequence where `stop` appears (resolved only).
    ///
    /// A stop can appear more than once on circular routes.
    pub fn positions_of(&self, stop: StopId) -> impl Iterator<Item = usize> + '_ {
        self.stops
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.stop == Some(stop))
            .map(|(i, _)| i)
    }

    /// True if the first and last resolved stops coincide.
    ///
    /// Such routes are treated as circular by the planner's `Wrap` policy.
    pub fn is_loop(&self) -> bool {
        let first = self.stops.iter().find_map(|s| s.stop);
        let last = self.stops.iter().rev().find_map(|s| s.stop);
        match (first, last) {
            (Some(a), Some(b)) => a == b && self.stops.len() > 1,
            _ => false,
        }
    }

    /// Resolved stop ids on this route, in sequence order (duplicates kept).
    pub fn resolved_stops(&self) -> impl Iterator<Item = StopId> + '_ {
        self.stops.iter().filter_map(|s| s.stop)
    }
}
