//! Catalog input document.
//!
//! The engine consumes a single JSON document at init: an array of route
//! records plus a stop name → `[latitude, longitude]` map. A copy of the
//! production catalog is bundled into the binary.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::TransportType;

/// Bundled supplementary catalog, embedded at compile time.
const BUNDLED_CATALOG: &str = include_str!("../../data/routes.json");

/// Errors from reading a catalog document.
///
/// These cover an unreadable or syntactically invalid document only.
/// Data-quality problems inside a well-formed document (short coordinate
/// arrays, dangling stop names) are skipped and reported during the
/// snapshot build, never surfaced as errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the document
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON or does not match the expected shape
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One route record as it appears in the source document.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    /// Unique route identifier
    pub id: String,

    /// Human-readable route name
    pub name: String,

    /// Operating company
    pub operator: String,

    /// Stop names in travel order
    pub stops: Vec<String>,

    /// Mode of transport; absent or unrecognized becomes `Unknown`
    #[serde(default)]
    pub transport_type: TransportType,

    /// Fare; defaults to 0.0 if absent
    #[serde(default)]
    pub price: f64,
}

/// The raw catalog document: routes plus stop coordinates.
///
/// Stop coordinate arrays are kept raw here; validation (at least two
/// finite components, in range) happens when the snapshot is built.
/// A `BTreeMap` keeps merge order deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    /// Route records
    pub routes: Vec<RouteRecord>,

    /// Stop name → `[latitude, longitude, ...]`
    #[serde(default)]
    pub stops: BTreeMap<String, Vec<f64>>,
}

impl CatalogDocument {
    /// Parse a document from a JSON string.
    pub fn from_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a document from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The catalog document bundled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_str(BUNDLED_CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_minimal_document() {
        let doc = CatalogDocument::from_str(
            r#"{
                "routes": [
                    {"id": "R1", "name": "Ring", "operator": "Op", "stops": ["A", "B"]}
                ],
                "stops": {"A": [21.0, -86.0], "B": [21.1, -86.1]}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.routes.len(), 1);
        assert_eq!(doc.routes[0].id, "R1");
        assert_eq!(doc.routes[0].transport_type, TransportType::Unknown);
        assert_eq!(doc.routes[0].price, 0.0);
        assert_eq!(doc.stops.len(), 2);
    }

    #[test]
    fn parse_full_route_record() {
        let doc = CatalogDocument::from_str(
            r#"{
                "routes": [{
                    "id": "R1", "name": "Ring", "operator": "Op",
                    "transport_type": "combi", "price": 13.5,
                    "stops": ["A"]
                }],
                "stops": {}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.routes[0].transport_type, TransportType::Combi);
        assert_eq!(doc.routes[0].price, 13.5);
    }

    #[test]
    fn unknown_transport_type_tolerated() {
        let doc = CatalogDocument::from_str(
            r#"{
                "routes": [{
                    "id": "R1", "name": "N", "operator": "",
                    "transport_type": "zeppelin", "stops": ["A"]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.routes[0].transport_type, TransportType::Unknown);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            CatalogDocument::from_str("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn from_path_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"routes": [], "stops": {{"A": [21.0, -86.0]}}}}"#
        )
        .unwrap();

        let doc = CatalogDocument::from_path(file.path()).unwrap();
        assert!(doc.routes.is_empty());
        assert_eq!(doc.stops["A"], vec![21.0, -86.0]);
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let result = CatalogDocument::from_path("/nonexistent/routes.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn bundled_catalog_parses() {
        let doc = CatalogDocument::bundled().unwrap();
        assert!(!doc.routes.is_empty());
        assert!(!doc.stops.is_empty());

        // Every stop named by a bundled route has coordinates.
        for route in &doc.routes {
            for stop in &route.stops {
                assert!(doc.stops.contains_key(stop), "missing coords for {stop}");
            }
        }
    }
}
