//! Shared catalog handle.
//!
//! Queries run concurrently against an immutable snapshot; the only writer
//! is an occasional wholesale stop merge from the host (supplementary
//! coordinate data arriving after startup). A reader takes the lock just
//! long enough to clone the `Arc`, then works lock-free.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::data::CatalogError;
use super::snapshot::{CatalogSnapshot, LoadReport};

/// Thread-safe handle to the current catalog snapshot.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl SharedCatalog {
    /// Wrap an already-built snapshot.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// Build and wrap the production snapshot (baseline + bundled data).
    pub fn bundled() -> Result<(Self, LoadReport), CatalogError> {
        let (snapshot, report) = CatalogSnapshot::bundled()?;
        Ok((Self::new(snapshot), report))
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock means a writer panicked mid-swap; the stored
            // Arc is still a complete snapshot, so reading it is safe.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Merge additional stop coordinates and swap in the rebuilt snapshot.
    ///
    /// Entries with fewer than two components or out-of-range coordinates
    /// are ignored. Returns the number of accepted entries. Routes are
    /// re-resolved, so previously dangling stop references can become
    /// matchable.
    pub fn merge_stops(&self, entries: &HashMap<String, Vec<f64>>) -> usize {
        let current = self.snapshot();
        let (rebuilt, accepted) = current.with_merged_stops(
            entries
                .iter()
                .map(|(name, components)| (name.as_str(), components.as_slice())),
        );

        debug!(accepted, total = rebuilt.registry().len(), "merged stop data");

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(rebuilt);

        accepted
    }
}
