//! Client configuration.

use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::coord::ZOOM_DEFAULT;

/// Default public Overpass endpoint.
pub const DEFAULT_SERVER: &str = "https://overpass.kumi.systems/api/interpreter/";

/// Configuration for an [`OverpassClient`](crate::overpass::OverpassClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overpass endpoint URL
    pub server: String,
    /// Client-identifying `User-Agent` header value
    pub user_agent: String,
    /// Tile zoom level
    pub zoom: u8,
    /// Disk cache settings
    pub cache: CacheConfig,
}

impl ClientConfig {
    /// Create a configuration with default endpoint, user agent, and
    /// zoom, caching under `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            user_agent: format!("Overscape/{}", crate::VERSION),
            zoom: ZOOM_DEFAULT,
            cache: CacheConfig::new(cache_dir),
        }
    }

    /// Set the Overpass endpoint URL.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the tile zoom level.
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Replace the cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}
