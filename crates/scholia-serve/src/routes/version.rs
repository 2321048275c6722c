//! Service version endpoints.

use axum::Json;

use crate::envelope::{CiteResponse, STATUS_SUCCESS, SERVICE_VERSION, VersionResponse, Versions};

/// `GET /` and `GET /cite`: the service family envelope.
pub async fn cite_version() -> Json<CiteResponse> {
    Json(CiteResponse {
        status: STATUS_SUCCESS,
        service: "/cite",
        versions: Versions {
            texts: SERVICE_VERSION.to_string(),
            ..Versions::default()
        },
    })
}

/// `GET /texts/version`: the text service version.
pub async fn texts_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        status: STATUS_SUCCESS,
        service: "/texts/version",
        version: SERVICE_VERSION,
    })
}
