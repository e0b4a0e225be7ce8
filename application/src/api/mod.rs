//! HTTP API definitions.

pub mod health;
pub mod listing;
pub mod params;
pub mod properties;
pub mod sections;

use std::time;

use axum::{routing::get, Extension, Router};

use crate::{context::LaunchedAt, Database, Service};

pub use self::{listing::Listing, params::QueryParams};

/// Name of the [`tracing::Span`] for the API handlers.
pub(crate) const SPAN_NAME: &str = "HTTP handler";

/// Creates a new [`Router`] serving the API with the provided [`Service`].
pub fn router<Db: Database>(service: Service<Db>) -> Router {
    Router::new()
        .route("/properties", get(properties::list::<Db>))
        .route("/properties/sections", get(sections::section::<Db>))
        .route("/properties/all-sections", get(sections::all::<Db>))
        .route("/properties/:id", get(properties::by_id::<Db>))
        .route("/health", get(health::check::<Db>))
        .layer(Extension(service))
        .layer(Extension(LaunchedAt(time::Instant::now())))
}
