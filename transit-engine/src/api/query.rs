//! The query engine façade.

use tracing::debug;

use crate::catalog::{CatalogError, LoadReport, SharedCatalog};
use crate::domain::TransportType;
use crate::planner::{Composer, PlannerConfig, deduplicate, rank_itineraries};
use crate::resolve::{Anchor, NoNearbyStop, ResolvedAnchor, resolve};

use super::dto::{ErrorBody, ItineraryResult, RouteSummary};

/// Longest accepted text anchor, in bytes. Anything longer is noise (or
/// deliberate flooding) rather than a stop name.
const MAX_INPUT_LEN: usize = 100;

/// Structured query failure.
///
/// Every variant is an expected outcome the host turns into user-facing
/// messaging; none of them indicates an engine defect.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Caller error in the request itself; surfaced immediately, never retried
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An endpoint could not be anchored to any stop
    #[error(transparent)]
    NoNearbyStop(#[from] NoNearbyStop),

    /// Both enumeration phases came up empty; normal on a sparse catalog
    #[error("no itinerary available from {origin} to {destination}")]
    NoRouteFound {
        origin: String,
        destination: String,
    },
}

impl QueryError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::InvalidInput(_) => "invalid_input",
            QueryError::NoNearbyStop(_) => "no_nearby_stop",
            QueryError::NoRouteFound { .. } => "no_route_found",
        }
    }

    /// The wire-format error object.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Per-query overrides over the engine's [`PlannerConfig`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Override the last-mile walking ceiling, in meters.
    pub max_walk_m: Option<f64>,

    /// Override the result cap.
    pub max_results: Option<usize>,

    /// Restrict candidate routes to one mode, e.g. `"combi"`.
    pub transport_type: Option<String>,
}

/// The public entry point: holds the catalog handle and planner defaults.
#[derive(Clone)]
pub struct Engine {
    catalog: SharedCatalog,
    config: PlannerConfig,
}

impl Engine {
    /// Create an engine over a catalog with the given planner defaults.
    pub fn new(catalog: SharedCatalog, config: PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine over the production catalog (baseline + bundled data) with
    /// default configuration.
    pub fn bundled() -> Result<(Self, LoadReport), CatalogError> {
        let (catalog, report) = SharedCatalog::bundled()?;
        Ok((Self::new(catalog, PlannerConfig::default()), report))
    }

    /// The underlying catalog handle.
    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// All catalog routes in the wire format.
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.catalog
            .snapshot()
            .routes()
            .iter()
            .map(RouteSummary::from)
            .collect()
    }

    /// Find ranked itineraries from `origin` to `destination`.
    ///
    /// Endpoint anchors are resolved to candidate stops and tried
    /// nearest-first; the first pair of anchors that composes to anything
    /// wins. Validation happens before any catalog work.
    ///
    /// # Errors
    ///
    /// - [`QueryError::InvalidInput`]: empty or oversized text, identical
    ///   endpoints, or unusable options
    /// - [`QueryError::NoNearbyStop`]: an endpoint anchored to nothing
    /// - [`QueryError::NoRouteFound`]: no direct or single-transfer
    ///   itinerary connects any anchor pair
    pub fn find_itineraries(
        &self,
        origin: &Anchor,
        destination: &Anchor,
        options: &QueryOptions,
    ) -> Result<Vec<ItineraryResult>, QueryError> {
        validate_anchor(origin, "origin")?;
        validate_anchor(destination, "destination")?;
        if anchors_equal(origin, destination) {
            return Err(QueryError::InvalidInput(
                "origin and destination are identical".into(),
            ));
        }

        let (config, filter) = self.effective(options)?;
        let snapshot = self.catalog.snapshot();

        let origin_anchors = resolve(snapshot.registry(), origin, config.max_walk_m)?;
        let destination_anchors = resolve(snapshot.registry(), destination, config.max_walk_m)?;
        debug!(
            origin_candidates = origin_anchors.len(),
            destination_candidates = destination_anchors.len(),
            "endpoints resolved"
        );

        let composer = Composer::new(&snapshot, &config);
        for (from, to) in anchor_pairs(&origin_anchors, &destination_anchors) {
            let candidates = composer.compose(from, to, filter);
            if candidates.is_empty() {
                continue;
            }

            let mut ranked = rank_itineraries(deduplicate(candidates));
            ranked.truncate(config.max_results);
            debug!(results = ranked.len(), "query done");
            return Ok(ranked.iter().map(ItineraryResult::from).collect());
        }

        Err(QueryError::NoRouteFound {
            origin: describe(origin),
            destination: describe(destination),
        })
    }

    /// Merge per-query options over the engine defaults.
    fn effective(
        &self,
        options: &QueryOptions,
    ) -> Result<(PlannerConfig, Option<TransportType>), QueryError> {
        let max_walk_m = options.max_walk_m.unwrap_or(self.config.max_walk_m);
        if !max_walk_m.is_finite() || max_walk_m <= 0.0 {
            return Err(QueryError::InvalidInput(
                "max_walk_m must be a positive number".into(),
            ));
        }

        let max_results = options.max_results.unwrap_or(self.config.max_results);
        if max_results == 0 {
            return Err(QueryError::InvalidInput(
                "max_results must be at least 1".into(),
            ));
        }

        let filter = match &options.transport_type {
            Some(name) => Some(TransportType::from_name(name).ok_or_else(|| {
                QueryError::InvalidInput(format!("unknown transport type: {name}"))
            })?),
            None => None,
        };

        Ok((
            PlannerConfig {
                max_walk_m,
                max_results,
                loop_policy: self.config.loop_policy,
            },
            filter,
        ))
    }
}

fn validate_anchor(anchor: &Anchor, which: &str) -> Result<(), QueryError> {
    if let Anchor::Name(name) = anchor {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(QueryError::InvalidInput(format!("{which} must not be empty")));
        }
        if trimmed.len() > MAX_INPUT_LEN {
            return Err(QueryError::InvalidInput(format!(
                "{which} exceeds {MAX_INPUT_LEN} characters"
            )));
        }
    }
    Ok(())
}

fn anchors_equal(a: &Anchor, b: &Anchor) -> bool {
    match (a, b) {
        (Anchor::Name(a), Anchor::Name(b)) => {
            a.trim().to_lowercase() == b.trim().to_lowercase()
        }
        (Anchor::Point(a), Anchor::Point(b)) => a == b,
        _ => false,
    }
}

fn describe(anchor: &Anchor) -> String {
    match anchor {
        Anchor::Name(name) => name.trim().to_string(),
        Anchor::Point(coord) => coord.to_string(),
    }
}

/// Anchor pairs in fallback order: smallest combined walk first. The sort
/// is stable, so pairs with equal walks (name anchors in particular) keep
/// the resolver's ranking order. Pairs that collapse to one stop are
/// skipped.
fn anchor_pairs(
    origins: &[ResolvedAnchor],
    destinations: &[ResolvedAnchor],
) -> Vec<(ResolvedAnchor, ResolvedAnchor)> {
    let mut pairs: Vec<(ResolvedAnchor, ResolvedAnchor)> = origins
        .iter()
        .flat_map(|o| destinations.iter().map(move |d| (*o, *d)))
        .filter(|(o, d)| o.stop != d.stop)
        .collect();

    pairs.sort_by(|(ao, ad), (bo, bd)| {
        (ao.walk_m + ad.walk_m).total_cmp(&(bo.walk_m + bd.walk_m))
    });

    pairs
}
