//! Tile and bounding-box type definitions

use std::fmt;

/// Zoom level used for all data tiles.
///
/// The Soundscape tile scheme serves every tile at zoom 16.
pub const ZOOM_DEFAULT: u8 = 16;

/// Identifier of a slippy-map tile at a fixed zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePoint {
    /// X coordinate (east-west), 0 at the antimeridian
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
}

impl TilePoint {
    /// Create a new tile point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Cache key for this tile, `"{x}_{y}"`.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.x, self.y)
    }
}

impl fmt::Display for TilePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangle in geographic coordinates.
///
/// Derived deterministically from a [`TilePoint`]; never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}
