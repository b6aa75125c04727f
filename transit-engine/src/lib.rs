//! Transit itinerary engine.
//!
//! Answers: "I'm here, I want to get there - which bus do I take,
//! and where do I change?"
//!
//! The engine resolves free-text or coordinate endpoints against a fixed
//! catalog of routes and stops, enumerates direct and single-transfer
//! itineraries, and ranks them. It runs fully in-process with no I/O after
//! the catalog is loaded.

pub mod api;
pub mod catalog;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod resolve;
