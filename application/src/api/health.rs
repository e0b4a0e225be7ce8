//! `/health` endpoint.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use common::DateTime;
use serde::Serialize;
use service::{query, read::health::Backend, Query as _};

use crate::{api, Context, Database};

/// Response of the `GET /health` endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` if the backend is connected, `degraded` otherwise.
    pub status: &'static str,

    /// [RFC 3339] date and time of the check.
    ///
    /// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339
    pub timestamp: String,

    /// Number of seconds the application has been running for.
    pub uptime: u64,

    /// Reachability of the backend.
    pub backend: &'static str,
}

impl HealthResponse {
    /// Creates a new [`HealthResponse`] out of the checked [`Backend`].
    #[must_use]
    pub fn new(backend: Backend, uptime: u64) -> Self {
        Self {
            status: if backend.is_connected() { "ok" } else { "degraded" },
            timestamp: DateTime::now().to_rfc3339(),
            uptime,
            backend: backend.into(),
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status = if self.status == "ok" {
            http::StatusCode::OK
        } else {
            http::StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

/// Reports whether the application and its backend are healthy.
#[tracing::instrument(
    skip_all,
    fields(
        http.handler = "health",
        otel.name = api::SPAN_NAME,
    ),
)]
pub async fn check<Db: Database>(ctx: Context<Db>) -> HealthResponse {
    let backend = ctx
        .service()
        .execute(query::Health)
        .await
        .unwrap_or_else(|never| match never {});

    HealthResponse::new(backend, ctx.uptime().as_secs())
}

#[cfg(test)]
mod spec {
    use service::read::health::Backend;

    use super::HealthResponse;

    #[test]
    fn degraded_unless_connected() {
        let ok = HealthResponse::new(Backend::Connected, 5);
        assert_eq!(ok.status, "ok");
        assert_eq!(ok.backend, "connected");
        assert_eq!(ok.uptime, 5);

        for backend in [Backend::Error, Backend::Unknown] {
            let degraded = HealthResponse::new(backend, 0);
            assert_eq!(degraded.status, "degraded");
            assert_eq!(degraded.backend, backend.as_ref());
        }
    }
}
