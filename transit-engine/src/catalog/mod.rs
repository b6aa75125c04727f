//! Catalog loading and the immutable startup snapshot.
//!
//! The catalog is assembled once: a hard-coded baseline of known landmarks,
//! then the bundled supplementary document merged on top (later entries win
//! on name collision). After that all query work is read-only lookups
//! against the [`CatalogSnapshot`].

mod baseline;
mod data;
mod registry;
mod routes;
mod shared;
mod snapshot;

pub use data::{CatalogDocument, CatalogError, RouteRecord};
pub use registry::StopRegistry;
pub use routes::RouteCatalog;
pub use shared::SharedCatalog;
pub use snapshot::{CatalogSnapshot, LoadReport};
