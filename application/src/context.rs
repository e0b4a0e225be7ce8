//! [`Context`]-related definitions.

use std::time;

use axum::{async_trait, extract::FromRequestParts};
use service::infra::Postgres;

use crate::{Error, Service};

/// Moment the application was launched at.
#[derive(Clone, Copy, Debug)]
pub struct LaunchedAt(pub time::Instant);

/// Application context of an HTTP request.
#[derive(Clone, Debug)]
pub struct Context<Db = Postgres> {
    /// [`Service`] instance.
    service: Service<Db>,

    /// Moment the application was launched at.
    launched_at: LaunchedAt,
}

impl<Db> Context<Db> {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service<Db> {
        &self.service
    }

    /// Returns how long the application has been running for.
    #[must_use]
    pub fn uptime(&self) -> time::Duration {
        self.launched_at.0.elapsed()
    }
}

#[async_trait]
impl<S, Db> FromRequestParts<S> for Context<Db>
where
    S: Send + Sync,
    Db: Clone + Send + Sync + 'static,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service<Db>>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;
        let launched_at = parts
            .extensions
            .get::<LaunchedAt>()
            .copied()
            .ok_or_else(|| Error::internal(&"missing `LaunchedAt` extension"))?;

        Ok(Self {
            service,
            launched_at,
        })
    }
}
