//! Endpoint resolution.
//!
//! Turns a user-supplied origin/destination - a free-text stop name or an
//! explicit coordinate - into ranked candidate stop anchors plus the
//! walking distance from the requested point to each anchor.
//!
//! Free text is matched against the registry only: exact (case-insensitive)
//! first, then fuzzily. The engine never geocodes arbitrary addresses; a
//! text anchor the registry cannot account for is the caller's problem to
//! geocode into a coordinate.

use crate::catalog::StopRegistry;
use crate::domain::{Coord, StopId};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const NAME_MATCH_THRESHOLD: f64 = 0.6;

/// Similarity assigned when one name contains the other.
const CONTAINMENT_SCORE: f64 = 0.95;

/// Most anchors returned per endpoint; callers fall back through them in
/// order, so a handful is plenty.
const MAX_ANCHORS: usize = 5;

/// A query endpoint as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// A stop name (or an approximation of one).
    Name(String),

    /// An exact position, e.g. from the device's geolocation.
    Point(Coord),
}

impl Anchor {
    /// Parse a raw endpoint string.
    ///
    /// `"21.16,-86.85"` becomes a [`Anchor::Point`]; anything that does
    /// not read as a `lat,lon` pair is treated as a name. A string that
    /// *does* read as a coordinate pair but is out of range is an error
    /// rather than silently becoming a name.
    pub fn parse(raw: &str) -> Result<Self, crate::domain::InvalidCoord> {
        let trimmed = raw.trim();
        if let Some((lat_s, lon_s)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat_s.trim().parse::<f64>(), lon_s.trim().parse::<f64>())
            {
                return Coord::new(lat, lon).map(Anchor::Point);
            }
        }
        Ok(Anchor::Name(trimmed.to_string()))
    }
}

/// A candidate stop for one endpoint, with the walk to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAnchor {
    /// Registry index of the candidate stop.
    pub stop: StopId,

    /// Walking distance from the requested point, in meters. Zero for
    /// name-resolved anchors (the user is asking about the stop itself).
    pub walk_m: f64,
}

/// Resolution failure: nothing in the registry accounts for the endpoint.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no stop near {input}")]
pub struct NoNearbyStop {
    /// The endpoint as the user supplied it.
    pub input: String,
}

/// Resolve an endpoint into ranked candidate anchors, best first.
///
/// Coordinates resolve through proximity search bounded by `max_walk_m`;
/// names resolve through exact-then-fuzzy matching. The returned list is
/// never empty.
///
/// # Errors
///
/// Returns [`NoNearbyStop`] when no stop lies within the walking radius
/// (coordinate input) or no name scores above the match threshold (text
/// input).
pub fn resolve(
    registry: &StopRegistry,
    anchor: &Anchor,
    max_walk_m: f64,
) -> Result<Vec<ResolvedAnchor>, NoNearbyStop> {
    let mut anchors = match anchor {
        Anchor::Point(coord) => registry
            .nearest(*coord, max_walk_m)
            .into_iter()
            .map(|(stop, walk_m)| ResolvedAnchor { stop, walk_m })
            .collect(),
        Anchor::Name(name) => resolve_name(registry, name),
    };

    if anchors.is_empty() {
        return Err(NoNearbyStop {
            input: anchor_description(anchor),
        });
    }

    anchors.truncate(MAX_ANCHORS);
    Ok(anchors)
}

fn anchor_description(anchor: &Anchor) -> String {
    match anchor {
        Anchor::Name(name) => name.clone(),
        Anchor::Point(coord) => coord.to_string(),
    }
}

/// Exact (case-insensitive) match first; otherwise every stop scoring
/// above the threshold, best score first, ties by name.
fn resolve_name(registry: &StopRegistry, name: &str) -> Vec<ResolvedAnchor> {
    let query = name.trim();

    if let Some(stop) = registry.id_of(query) {
        return vec![ResolvedAnchor { stop, walk_m: 0.0 }];
    }

    let query_norm = query.to_lowercase();
    let mut scored: Vec<(StopId, f64, &str)> = registry
        .iter()
        .filter_map(|(id, stop)| {
            let score = name_similarity(&query_norm, &stop.name.to_lowercase());
            (score > NAME_MATCH_THRESHOLD).then_some((id, score, stop.name.as_str()))
        })
        .collect();

    scored.sort_by(|(_, a_score, a_name), (_, b_score, b_name)| {
        b_score.total_cmp(a_score).then_with(|| a_name.cmp(b_name))
    });

    scored
        .into_iter()
        .map(|(stop, _, _)| ResolvedAnchor { stop, walk_m: 0.0 })
        .collect()
}

/// Jaro-Winkler similarity, boosted when one normalized name contains the
/// other ("Ultramar" should match "Muelle Ultramar" strongly).
fn name_similarity(query_norm: &str, stop_norm: &str) -> f64 {
    let score = strsim::jaro_winkler(query_norm, stop_norm);
    if stop_norm.contains(query_norm) || query_norm.contains(stop_norm) {
        score.max(CONTAINMENT_SCORE)
    } else {
        score
    }
}
