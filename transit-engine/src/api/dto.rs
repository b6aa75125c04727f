//! Wire types for query results.

use serde::Serialize;

use crate::domain::{Itinerary, Route};

/// One leg of a returned itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegResult {
    /// Route ridden
    pub route_id: String,

    /// Boarding stop name
    pub board_stop: String,

    /// Alighting stop name
    pub alight_stop: String,
}

/// A ranked itinerary in the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryResult {
    /// Legs in travel order
    pub legs: Vec<LegResult>,

    /// Walk from the requested origin to the first boarding stop, meters
    pub last_mile_origin_m: f64,

    /// Walk from the final alighting stop to the requested destination, meters
    pub last_mile_destination_m: f64,

    /// Walks plus in-route distance across all legs, meters
    pub total_distance_m: f64,

    /// Number of route changes
    pub transfer_count: usize,
}

impl From<&Itinerary> for ItineraryResult {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            legs: itinerary
                .legs()
                .iter()
                .map(|leg| LegResult {
                    route_id: leg.route.to_string(),
                    board_stop: leg.board.clone(),
                    alight_stop: leg.alight.clone(),
                })
                .collect(),
            last_mile_origin_m: itinerary.last_mile_origin_m(),
            last_mile_destination_m: itinerary.last_mile_destination_m(),
            total_distance_m: itinerary.total_distance_m(),
            transfer_count: itinerary.transfer_count(),
        }
    }
}

/// A catalog route in the wire format, for route-browser UIs.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    /// Unique route identifier
    pub id: String,

    /// Human-readable route name
    pub name: String,

    /// Operating company, possibly empty
    pub operator: String,

    /// Lowercase mode name, empty when unknown
    pub transport_type: String,

    /// Fare in local currency
    pub price: f64,

    /// Stop names in travel order
    pub stops: Vec<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name.clone(),
            operator: route.operator.clone(),
            transport_type: route.transport_type.to_string(),
            price: route.price,
            stops: route.stops.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

/// Structured failure in the wire format.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable kind
    pub kind: &'static str,

    /// Human-readable description
    pub message: String,
}
