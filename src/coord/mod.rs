//! Slippy-map tile coordinate math
//!
//! Converts `(x, y, zoom)` tile coordinates in the Web Mercator tile
//! scheme to geographic bounding boxes. The formulas replicate the
//! standard slippy-map convention so downstream coordinate comparisons
//! against reference tile servers are exact.

mod types;

pub use types::{BoundingBox, TilePoint, ZOOM_DEFAULT};

use std::f64::consts::PI;

/// Converts tile coordinates to geographic coordinates.
///
/// Returns the `(lat, lon)` of the tile's northwest corner. Pass
/// `x + 1` and/or `y + 1` to obtain the other corners.
#[inline]
pub fn tile_to_lat_lon(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let n = 2.0_f64.powi(zoom as i32);

    let lon = x / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y / n)).sinh().atan();

    (lat_rad.to_degrees(), lon)
}

/// Computes the geographic bounding box covered by a tile.
///
/// Corner A is `(x, y)`, corner B is `(x + 1, y + 1)`; the box is the
/// min/max of the two corners per axis.
pub fn tile_bounding_box(tile: TilePoint, zoom: u8) -> BoundingBox {
    let (a_lat, a_lon) = tile_to_lat_lon(tile.x as f64, tile.y as f64, zoom);
    let (b_lat, b_lon) = tile_to_lat_lon((tile.x + 1) as f64, (tile.y + 1) as f64, zoom);

    BoundingBox {
        min_lon: a_lon.min(b_lon),
        min_lat: a_lat.min(b_lat),
        max_lon: a_lon.max(b_lon),
        max_lat: a_lat.max(b_lat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_washington_dc_tile_at_zoom_16() {
        // Reference values from the slippy-map tile formula
        let bbox = tile_bounding_box(TilePoint::new(18741, 25054), 16);

        // Longitudes involve only exact binary arithmetic
        assert_eq!(bbox.min_lon, -77.0526123046875);
        assert_eq!(bbox.max_lon, -77.047119140625);
        // Latitudes pass through sinh/atan; compare within the 1e-7
        // relative tolerance used by downstream reference comparisons
        assert!((bbox.min_lat - 38.96368010198575).abs() < 1e-9);
        assert!((bbox.max_lat - 38.96795115401592).abs() < 1e-9);
    }

    #[test]
    fn test_northwest_corner_is_max_lat_min_lon() {
        // Tile y grows southward, so the (x, y) corner carries the
        // maximum latitude and minimum longitude.
        let tile = TilePoint::new(18747, 25074);
        let (lat, lon) = tile_to_lat_lon(tile.x as f64, tile.y as f64, 16);
        let bbox = tile_bounding_box(tile, 16);

        assert_eq!(lat, bbox.max_lat);
        assert_eq!(lon, bbox.min_lon);
    }

    #[test]
    fn test_origin_tile() {
        let bbox = tile_bounding_box(TilePoint::new(0, 0), 16);

        assert_eq!(bbox.min_lon, -180.0);
        assert!(bbox.max_lat > 85.0 && bbox.max_lat < 85.06);
    }

    #[test]
    fn test_bbox_ordering_invariant() {
        for (x, y) in [(0, 0), (1, 1), (18741, 25054), (32768, 32768), (65535, 65535)] {
            let bbox = tile_bounding_box(TilePoint::new(x, y), 16);
            assert!(bbox.min_lon <= bbox.max_lon, "tile ({}, {})", x, y);
            assert!(bbox.min_lat <= bbox.max_lat, "tile ({}, {})", x, y);
        }
    }

    #[test]
    fn test_adjacent_tiles_share_an_edge() {
        let left = tile_bounding_box(TilePoint::new(18741, 25054), 16);
        let right = tile_bounding_box(TilePoint::new(18742, 25054), 16);

        assert_eq!(left.max_lon, right.min_lon);
        assert_eq!(left.min_lat, right.min_lat);
        assert_eq!(left.max_lat, right.max_lat);
    }
}
