//! Soundscape data-plane GeoJSON wire types.
//!
//! Every feature carries `feature_type`, `feature_value`, `geometry`,
//! `osm_ids`, `properties`, and `type`, matching the documented
//! Soundscape data-plane schema consumed by map-rendering clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Longitude/latitude pair, serialized as a two-element array.
pub type Position = (f64, f64);

/// GeoJSON geometry object.
///
/// Serializes as `{"type": "...", "coordinates": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

/// One OSM element as produced by the geometry-conversion
/// collaborator: numeric id, assembled geometry, and the element's
/// full tag map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    pub id: i64,
    pub geometry: Geometry,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl GeometryRecord {
    pub fn new(id: i64, geometry: Geometry, tags: BTreeMap<String, String>) -> Self {
        Self { id, geometry, tags }
    }
}

/// Marker for the constant GeoJSON `"type": "Feature"` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

/// Marker for the constant `"type": "FeatureCollection"` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// One feature in the output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub feature_type: String,
    pub feature_value: String,
    pub geometry: Geometry,
    pub osm_ids: Vec<i64>,
    pub properties: BTreeMap<String, String>,
    #[serde(rename = "type")]
    pub r#type: FeatureTag,
}

impl Feature {
    pub fn new(
        feature_type: impl Into<String>,
        feature_value: impl Into<String>,
        geometry: Geometry,
        osm_ids: Vec<i64>,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            feature_type: feature_type.into(),
            feature_value: feature_value.into(),
            geometry,
            osm_ids,
            properties,
            r#type: FeatureTag::Feature,
        }
    }
}

/// The unit stored in, and retrieved from, the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    #[serde(rename = "type")]
    pub r#type: FeatureCollectionTag,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            r#type: FeatureCollectionTag::FeatureCollection,
        }
    }
}
