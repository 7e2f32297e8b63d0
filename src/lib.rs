//! Overscape - Soundscape tile data from Overpass
//!
//! Fetches map feature data for a single slippy-map tile from an
//! Overpass endpoint, converts the result into the Soundscape
//! data-plane GeoJSON schema (including synthetic road-intersection
//! features), and caches the transformed collection on disk as
//! compressed JSON so repeat requests avoid the network.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use overscape::config::ClientConfig;
//! use overscape::coord::TilePoint;
//! use overscape::overpass::{OverpassClient, ReqwestClient};
//! use overscape::taxonomy::TagTaxonomy;
//!
//! let config = ClientConfig::new("/var/cache/overscape");
//! let client = OverpassClient::new(
//!     config,
//!     ReqwestClient::new()?,
//!     converter, // OSM-to-GeoJSON collaborator implementing GeometryConverter
//!     Arc::new(TagTaxonomy::default()),
//! )?;
//!
//! let collection = client.query(TilePoint::new(18741, 25054)).await?;
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod coord;
pub mod geojson;
pub mod logging;
pub mod overpass;
pub mod taxonomy;

/// Version of the overscape library.
///
/// Defined in `Cargo.toml` and injected at compile time; also used in
/// the default `User-Agent` string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
