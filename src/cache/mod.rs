//! Tile-keyed compressed disk cache.

mod compressed;
mod types;

pub use compressed::CompressedJsonCache;
pub use types::{CacheConfig, CacheError};
