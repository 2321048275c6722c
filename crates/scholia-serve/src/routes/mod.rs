//! Route definitions.
//!
//! ## Routes
//!
//! - `GET /`, `GET /cite` - service family versions
//! - `GET /texts/version` - text service version
//! - `GET /healthz` - source reachability (503 when unreachable)
//! - `GET [/{cex}]/texts` - work-stem URNs
//! - `GET [/{cex}]/texts/catalog` - catalog entries
//! - `GET [/{cex}]/texts/first/{urn}` - first passage of a work
//! - `GET [/{cex}]/texts/last/{urn}` - last passage of a work
//! - `GET [/{cex}]/texts/previous/{urn}` - predecessor in bundle order
//! - `GET [/{cex}]/texts/next/{urn}` - successor in bundle order
//! - `GET [/{cex}]/texts/urns/{urn}` - URN enumeration
//! - `GET [/{cex}]/texts/{urn}` - passage resolver
//!
//! The texts set is mounted twice so the CEX slug segment stays optional;
//! requests without one resolve their source via the config fallback.

mod health;
mod texts;
mod version;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(version::cite_version))
        .route("/cite", get(version::cite_version))
        .route("/texts/version", get(version::texts_version))
        .route("/healthz", get(health::healthz))
        .merge(texts_routes())
        .nest("/{cex}", texts_routes())
        .with_state(state)
}

fn texts_routes() -> Router<AppState> {
    Router::new()
        .route("/texts", get(texts::work_urns))
        .route("/texts/catalog", get(texts::catalog))
        .route("/texts/first/{urn}", get(texts::first))
        .route("/texts/last/{urn}", get(texts::last))
        .route("/texts/previous/{urn}", get(texts::previous))
        .route("/texts/next/{urn}", get(texts::next))
        .route("/texts/urns/{urn}", get(texts::urns))
        .route("/texts/{urn}", get(texts::passage))
}
