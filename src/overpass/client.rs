//! Overpass client: cache-fronted tile queries.
//!
//! Control flow per tile: cache lookup, on miss build + execute the
//! Overpass query, convert the raw document to geometry records,
//! transform into the output schema, store the result. Transport and
//! upstream failures degrade to an absent result and are never cached;
//! callers see either a complete collection or nothing.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::cache::{CacheError, CompressedJsonCache};
use crate::config::ClientConfig;
use crate::convert::GeometryConverter;
use crate::coord::TilePoint;
use crate::geojson::{feature_collection, FeatureCollection, TransformError};
use crate::taxonomy::TagTaxonomy;

use super::http::AsyncHttpClient;
use super::query::QueryBuilder;

/// Errors surfaced by [`OverpassClient`].
///
/// Transport and upstream failures are not errors; they are reported
/// as an absent result. An error here means the client itself is
/// misconfigured or an internal invariant broke.
#[derive(Debug, Error)]
pub enum OverpassError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A matched element carried no recognized tag: the query and the
    /// transformer are out of sync
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Client for a single Overpass endpoint, serving transformed feature
/// collections per tile through the compressed disk cache.
pub struct OverpassClient<C, G> {
    server: String,
    user_agent: String,
    cache: CompressedJsonCache,
    builder: QueryBuilder,
    http: C,
    converter: G,
}

impl<C: AsyncHttpClient, G: GeometryConverter> OverpassClient<C, G> {
    /// Create a client.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, user agent, zoom, and cache settings
    /// * `http` - HTTP transport
    /// * `converter` - OSM-to-GeoJSON conversion collaborator
    /// * `taxonomy` - Primary tag taxonomy, shared read-only
    pub fn new(
        config: ClientConfig,
        http: C,
        converter: G,
        taxonomy: Arc<TagTaxonomy>,
    ) -> Result<Self, OverpassError> {
        Ok(Self {
            cache: CompressedJsonCache::new(config.cache)?,
            builder: QueryBuilder::new(taxonomy, config.zoom),
            server: config.server,
            user_agent: config.user_agent,
            http,
            converter,
        })
    }

    /// Fetch the feature collection for one tile, served from cache
    /// when possible.
    ///
    /// Returns `Ok(None)` when the tile is currently unavailable
    /// (transport failure, upstream error); such results are not
    /// cached, so the next request retries.
    pub async fn query(
        &self,
        tile: TilePoint,
    ) -> Result<Option<FeatureCollection>, OverpassError> {
        let key = tile.cache_key();

        let mut failure: Option<OverpassError> = None;
        let result = {
            let failure = &mut failure;
            self.cache
                .get(&key, move || async move {
                    match self.uncached_query(tile).await {
                        Ok(value) => value,
                        Err(e) => {
                            *failure = Some(e);
                            None
                        }
                    }
                })
                .await
        };

        match failure {
            Some(error) => Err(error),
            None => Ok(result),
        }
    }

    /// Fetch and transform one tile, bypassing the cache.
    pub async fn uncached_query(
        &self,
        tile: TilePoint,
    ) -> Result<Option<FeatureCollection>, OverpassError> {
        let query = self.builder.build(tile);

        let Some(raw) = self.execute(&query).await else {
            return Ok(None);
        };

        let records = match self.converter.convert(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(tile = %tile, error = %e, "geometry conversion failed");
                return Ok(None);
            }
        };

        let collection = feature_collection(&records, self.builder.taxonomy())?;
        Ok(Some(collection))
    }

    /// Execute one query against the endpoint.
    ///
    /// Returns `None` on connection failure, timeout, non-2xx status,
    /// or an unparseable body, logging a warning for each. No retries
    /// at this layer.
    pub async fn execute(&self, query: &str) -> Option<Value> {
        let response = match self
            .http
            .get(
                &self.server,
                &[("data", query)],
                &[("User-Agent", self.user_agent.as_str())],
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("error connecting to {}: {}", self.server, e);
                return None;
            }
        };

        if !response.is_success() {
            warn!("received {} from {}", response.status, self.server);
            return None;
        }

        match serde_json::from_slice(&response.body) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("invalid JSON from {}: {}", self.server, e);
                None
            }
        }
    }
}
