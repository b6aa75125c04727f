//! Domain types for the itinerary engine.
//!
//! Core types representing validated catalog data and query results.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coord;
mod error;
mod itinerary;
mod route;
mod stop;

pub use coord::{Coord, InvalidCoord};
pub use error::DomainError;
pub use itinerary::{Itinerary, Leg};
pub use route::{Route, RouteId, StopRef, TransportType};
pub use stop::{Stop, StopId};
