//! Output GeoJSON schema and the feature transformation pipeline.

mod transform;
mod types;

pub use transform::{
    compute_intersections, feature_collection, to_features, TransformError, INTERSECTION_VALUE,
};
pub use types::{
    Feature, FeatureCollection, FeatureCollectionTag, FeatureTag, Geometry, GeometryRecord,
    Position,
};
