//! Conversion of geometry records into the output feature schema.
//!
//! Two passes over the converted records: every record becomes one
//! feature classified by its primary tag, and every coordinate shared
//! by two or more highway line features becomes one synthetic
//! intersection feature.

use std::collections::BTreeMap;
use std::collections::HashMap;

use thiserror::Error;

use crate::taxonomy::TagTaxonomy;

use super::types::{Feature, FeatureCollection, Geometry, GeometryRecord, Position};

/// Tag key whose line features participate in intersection detection.
const INTERSECTION_KEY: &str = "highway";

/// Feature value assigned to synthesized intersection features.
pub const INTERSECTION_VALUE: &str = "gd_intersection";

/// Errors raised while transforming geometry records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A record matched by the query carries none of the taxonomy
    /// keys. The query and the transformer are out of sync; this is a
    /// bug, not data noise.
    #[error("element {id} carries no recognized primary tag")]
    NoPrimaryTag { id: i64 },
}

/// Convert each record into one feature classified by its primary tag.
///
/// The record's geometry is carried over verbatim and its full tag map
/// becomes the feature's properties.
pub fn to_features(
    records: &[GeometryRecord],
    taxonomy: &TagTaxonomy,
) -> Result<Vec<Feature>, TransformError> {
    records
        .iter()
        .map(|record| {
            let (key, value) = taxonomy
                .primary_tag(&record.tags)
                .ok_or(TransformError::NoPrimaryTag { id: record.id })?;
            Ok(Feature::new(
                key,
                value,
                record.geometry.clone(),
                vec![record.id],
                record.tags.clone(),
            ))
        })
        .collect()
}

/// Synthesize one point feature per coordinate shared by two or more
/// highway line features.
///
/// Coordinates are compared for exact equality (f64 bit patterns):
/// shared nodes originate from the same Overpass document, so their
/// coordinates are bit-identical. Contributing way ids are listed in
/// the order the ways were encountered, and output features follow the
/// first-seen order of the shared points.
pub fn compute_intersections(records: &[GeometryRecord]) -> Vec<Feature> {
    let mut seen_order: Vec<Position> = Vec::new();
    let mut ids_by_point: HashMap<(u64, u64), Vec<i64>> = HashMap::new();

    for record in records {
        let Geometry::LineString(points) = &record.geometry else {
            continue;
        };
        if !record.tags.contains_key(INTERSECTION_KEY) {
            continue;
        }
        for &point in points {
            let ids = ids_by_point.entry(point_key(point)).or_insert_with(|| {
                seen_order.push(point);
                Vec::new()
            });
            ids.push(record.id);
        }
    }

    seen_order
        .into_iter()
        .filter_map(|point| {
            let ids = &ids_by_point[&point_key(point)];
            (ids.len() > 1).then(|| {
                Feature::new(
                    INTERSECTION_KEY,
                    INTERSECTION_VALUE,
                    Geometry::Point(point),
                    ids.clone(),
                    BTreeMap::new(),
                )
            })
        })
        .collect()
}

/// Build the complete output collection: simple features first, then
/// intersection features.
pub fn feature_collection(
    records: &[GeometryRecord],
    taxonomy: &TagTaxonomy,
) -> Result<FeatureCollection, TransformError> {
    let mut features = to_features(records, taxonomy)?;
    features.extend(compute_intersections(records));
    Ok(FeatureCollection::new(features))
}

fn point_key((lon, lat): Position) -> (u64, u64) {
    (lon.to_bits(), lat.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::FeatureTag;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn road(id: i64, points: Vec<Position>) -> GeometryRecord {
        GeometryRecord::new(
            id,
            Geometry::LineString(points),
            tags(&[("highway", "residential"), ("name", "Test St")]),
        )
    }

    #[test]
    fn test_to_features_schema() {
        let taxonomy = TagTaxonomy::default();
        let records = vec![GeometryRecord::new(
            10,
            Geometry::Point((-77.05, 38.96)),
            tags(&[("highway", "bus_stop"), ("shelter", "yes")]),
        )];

        let features = to_features(&records, &taxonomy).unwrap();
        assert_eq!(features.len(), 1);

        let feature = &features[0];
        assert_eq!(feature.feature_type, "highway");
        assert_eq!(feature.feature_value, "bus_stop");
        assert_eq!(feature.osm_ids, vec![10]);
        assert_eq!(feature.geometry, Geometry::Point((-77.05, 38.96)));
        assert_eq!(
            feature.properties,
            tags(&[("highway", "bus_stop"), ("shelter", "yes")])
        );
        assert_eq!(feature.r#type, FeatureTag::Feature);
        assert!(taxonomy.contains_key(&feature.feature_type));
    }

    #[test]
    fn test_to_features_rejects_untagged_record() {
        let taxonomy = TagTaxonomy::default();
        let records = vec![GeometryRecord::new(
            99,
            Geometry::Point((0.0, 0.0)),
            tags(&[("opening_hours", "24/7")]),
        )];

        assert_eq!(
            to_features(&records, &taxonomy),
            Err(TransformError::NoPrimaryTag { id: 99 })
        );
    }

    #[test]
    fn test_shared_point_becomes_intersection() {
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            road(2, vec![(3.0, 0.0), (1.0, 1.0), (0.0, 3.0)]),
        ];

        let intersections = compute_intersections(&records);
        assert_eq!(intersections.len(), 1);

        let feature = &intersections[0];
        assert_eq!(feature.feature_type, "highway");
        assert_eq!(feature.feature_value, INTERSECTION_VALUE);
        assert_eq!(feature.geometry, Geometry::Point((1.0, 1.0)));
        assert_eq!(feature.osm_ids, vec![1, 2]);
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn test_disjoint_roads_produce_no_intersections() {
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            road(2, vec![(5.0, 5.0), (6.0, 6.0)]),
        ];
        assert!(compute_intersections(&records).is_empty());
    }

    #[test]
    fn test_nearly_equal_coordinates_do_not_match() {
        // Exact-coordinate matching, not spatial tolerance.
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            road(2, vec![(1.0 + 1e-12, 1.0), (2.0, 2.0)]),
        ];
        assert!(compute_intersections(&records).is_empty());
    }

    #[test]
    fn test_non_highway_lines_are_ignored() {
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            GeometryRecord::new(
                2,
                Geometry::LineString(vec![(1.0, 1.0), (2.0, 2.0)]),
                tags(&[("natural", "coastline")]),
            ),
        ];
        assert!(compute_intersections(&records).is_empty());
    }

    #[test]
    fn test_point_geometries_are_ignored() {
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            GeometryRecord::new(
                2,
                Geometry::Point((1.0, 1.0)),
                tags(&[("highway", "bus_stop")]),
            ),
        ];
        assert!(compute_intersections(&records).is_empty());
    }

    #[test]
    fn test_three_way_intersection_lists_all_ids_in_order() {
        let records = vec![
            road(5, vec![(1.0, 1.0), (2.0, 2.0)]),
            road(3, vec![(0.0, 0.0), (1.0, 1.0)]),
            road(9, vec![(1.0, 1.0), (0.0, 2.0)]),
        ];

        let intersections = compute_intersections(&records);
        assert_eq!(intersections.len(), 1);
        assert_eq!(intersections[0].osm_ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_collection_orders_simple_features_before_intersections() {
        let taxonomy = TagTaxonomy::default();
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            road(2, vec![(1.0, 1.0), (2.0, 0.0)]),
        ];

        let collection = feature_collection(&records, &taxonomy).unwrap();
        assert_eq!(collection.features.len(), 3);
        assert_eq!(collection.features[0].osm_ids, vec![1]);
        assert_eq!(collection.features[1].osm_ids, vec![2]);
        assert_eq!(collection.features[2].feature_value, INTERSECTION_VALUE);
    }

    #[test]
    fn test_intersection_ids_reference_simple_features() {
        // Each id in an intersection's osm_ids appears as the sole
        // osm_ids entry of exactly one simple feature.
        let taxonomy = TagTaxonomy::default();
        let records = vec![
            road(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            road(2, vec![(1.0, 1.0), (2.0, 0.0)]),
            road(3, vec![(9.0, 9.0), (8.0, 8.0)]),
        ];

        let collection = feature_collection(&records, &taxonomy).unwrap();
        let (intersections, simple): (Vec<_>, Vec<_>) = collection
            .features
            .iter()
            .partition(|f| f.feature_value == INTERSECTION_VALUE);

        for intersection in intersections {
            for id in &intersection.osm_ids {
                let matching = simple
                    .iter()
                    .filter(|f| f.osm_ids == vec![*id])
                    .count();
                assert_eq!(matching, 1, "id {id} should match exactly one feature");
            }
        }
    }
}
