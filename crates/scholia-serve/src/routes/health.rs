//! Source reachability probe.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::envelope::HealthResponse;
use crate::fetch::check_source_reachable;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthQuery {
    pub cex: Option<String>,
}

/// `GET /healthz`: 200 when the configured source answers, 503 otherwise.
/// Always probes live; the bundle cache is not consulted.
pub async fn healthz(
    State(state): State<AppState>,
    Query(query): Query<HealthQuery>,
) -> Response {
    let source = state.config.pick_source(None, query.cex.as_deref());
    match check_source_reachable(&state, &source).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                source,
                message: None,
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(source = %source, error = %err, "source unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    source,
                    message: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
