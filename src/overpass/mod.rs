//! Overpass query construction, execution, and orchestration.

mod client;
mod http;
mod query;

pub use client::{OverpassClient, OverpassError};
pub use http::{AsyncHttpClient, HttpError, HttpResponse, ReqwestClient};
pub use query::QueryBuilder;

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
