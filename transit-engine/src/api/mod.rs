//! Public query façade.
//!
//! The host application talks to the engine through [`Engine`]: raw
//! origin/destination input goes in, a ranked serializable result set (or
//! a structured failure) comes out. Everything is a synchronous in-process
//! call; there is no network surface.

mod dto;
mod query;

pub use dto::{ErrorBody, ItineraryResult, LegResult, RouteSummary};
pub use query::{Engine, QueryError, QueryOptions};
