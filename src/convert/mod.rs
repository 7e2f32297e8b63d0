//! Seam for the external OSM-to-GeoJSON conversion collaborator.
//!
//! Assembling OSM elements into geometries (node/way/relation to
//! point/line/polygon, multipolygon ring resolution) is owned by an
//! external library; this crate only consumes the typed records it
//! produces. The trait enables dependency injection and canned-output
//! mocks in tests.

use thiserror::Error;

use crate::geojson::GeometryRecord;

/// Error type for geometry conversion.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// The raw document does not match the Overpass geometry export
    /// format
    #[error("malformed overpass document: {0}")]
    Malformed(String),
}

/// Converts a raw Overpass JSON document into typed geometry records,
/// one per matched OSM node/way/relation.
pub trait GeometryConverter: Send + Sync {
    fn convert(&self, raw: &serde_json::Value) -> Result<Vec<GeometryRecord>, ConvertError>;
}
