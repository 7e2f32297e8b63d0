//! Overpass QL query construction.

use std::fmt::Write;
use std::sync::Arc;

use crate::coord::{tile_bounding_box, TilePoint};
use crate::taxonomy::TagTaxonomy;

/// Builds the per-tile Overpass query as the union of all taxonomy
/// predicates, scoped to the tile's bounding box.
///
/// The query looks like (shortened):
///
/// ```text
/// [out:json][bbox:34.873928,-77.835639,38.267204,-74.495140];
/// (
/// nwr[amenity];
/// nwr[building];
/// nwr[railway~'station|subway_entrance|tram_stop'];
/// );
/// out geom;
/// ```
///
/// Each `nwr` predicate independently matches any node/way/relation
/// carrying the tag key (restricted to the allowed values when the
/// taxonomy lists any), and `out geom` requests full geometry in the
/// response. The same tile always yields the same query text;
/// predicate order follows taxonomy order.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    taxonomy: Arc<TagTaxonomy>,
    zoom: u8,
}

impl QueryBuilder {
    pub fn new(taxonomy: Arc<TagTaxonomy>, zoom: u8) -> Self {
        Self { taxonomy, zoom }
    }

    /// The taxonomy this builder matches against.
    pub fn taxonomy(&self) -> &TagTaxonomy {
        &self.taxonomy
    }

    /// Build the query for one tile.
    pub fn build(&self, tile: TilePoint) -> String {
        let bbox = tile_bounding_box(tile, self.zoom);

        let mut predicates = String::new();
        for entry in self.taxonomy.iter() {
            if entry.values.is_empty() {
                let _ = writeln!(predicates, "nwr[{}];", entry.key);
            } else {
                let _ = writeln!(predicates, "nwr[{}~'{}'];", entry.key, entry.values.join("|"));
            }
        }

        // Overpass bbox order is south,west,north,east
        format!(
            "[out:json][bbox:{},{},{},{}];\n(\n{});\nout geom;",
            bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon, predicates
        )
    }
}
