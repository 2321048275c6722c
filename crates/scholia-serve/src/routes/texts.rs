//! Text service endpoints: work listing, catalog, navigation, URN
//! enumeration, and passage resolution.
//!
//! Every handler is mounted twice — bare and under an optional `/{cex}`
//! segment — so path parameters arrive as a map. Exceptional lookups stay
//! on HTTP 200 with an `Exception` envelope; malformed requests map to
//! 400 and upstream failures to 502.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use scholia_core::{
    Corpus, TextFilters, enumerate_urns, first_in_work, is_cts_urn, is_range, last_in_work,
    next_of, parse_catalog, parse_data, previous_of, resolve, work_stem,
};

use crate::envelope::{CatalogResponse, NodeResponse, STATUS_EXCEPTION, STATUS_SUCCESS, UrnListResponse};
use crate::fetch::fetch_bundle;
use crate::state::AppState;

/// Query parameters shared by the texts endpoints. All values are decoded
/// leniently: unparsable numbers fall back to their defaults and booleans
/// accept `1/t/true/y/yes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextQuery {
    pub cex: Option<String>,
    pub substring: Option<String>,
    pub clip: Option<String>,
    pub context: Option<String>,
    #[serde(rename = "maxChars")]
    pub max_chars: Option<String>,
    pub tail: Option<String>,
}

impl TextQuery {
    fn filters(&self) -> TextFilters {
        TextFilters {
            substring: self.substring.clone(),
            clip: self
                .clip
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_bool),
            context: self.context.as_deref().and_then(|s| s.trim().parse().ok()),
            max_chars: self
                .max_chars
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            tail: self.tail.as_deref().is_some_and(parse_bool),
        }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "t" | "true" | "y" | "yes"
    )
}

fn path_urn(params: &HashMap<String, String>) -> String {
    params.get("urn").cloned().unwrap_or_default()
}

fn source_for(state: &AppState, params: &HashMap<String, String>, query: &TextQuery) -> String {
    state
        .config
        .pick_source(params.get("cex").map(String::as_str), query.cex.as_deref())
}

/// Fetch and parse the passage section of a source bundle.
async fn corpus_for(state: &AppState, source: &str) -> Result<Corpus, String> {
    let body = fetch_bundle(state, source)
        .await
        .map_err(|e| e.to_string())?;
    parse_data(&body).map_err(|e| e.to_string())
}

fn upstream_failure(
    service: &'static str,
    request_urn: &str,
    source: &str,
    error: &str,
) -> Response {
    tracing::warn!(source = %source, error = %error, "bundle unavailable");
    (
        StatusCode::BAD_GATEWAY,
        Json(NodeResponse::exception(
            service,
            request_urn,
            format!("No results for {request_urn}"),
        )),
    )
        .into_response()
}

/// `GET [/{cex}]/texts`: distinct work stems in bundle order.
pub async fn work_urns(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
) -> Response {
    const SVC: &str = "/texts";
    let source = source_for(&state, &params, &query);
    match corpus_for(&state, &source).await {
        Ok(corpus) => (
            StatusCode::OK,
            Json(UrnListResponse::success(SVC, vec![], corpus.work_stems())),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!(source = %source, error = %error, "bundle unavailable");
            (
                StatusCode::BAD_GATEWAY,
                Json(UrnListResponse::exception(
                    SVC,
                    vec![],
                    "Couldn't open connection.".to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// `GET [/{cex}]/texts/catalog`: the `#!ctscatalog` entries.
pub async fn catalog(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
) -> Response {
    const SVC: &str = "/texts/catalog";
    let source = source_for(&state, &params, &query);
    let parsed = match fetch_bundle(&state, &source).await {
        Ok(body) => parse_catalog(&body).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match parsed {
        Ok(entries) => (
            StatusCode::OK,
            Json(CatalogResponse {
                status: STATUS_SUCCESS,
                service: SVC,
                entries,
                message: String::new(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!(source = %source, error = %error, "catalog unavailable");
            (
                StatusCode::BAD_GATEWAY,
                Json(CatalogResponse {
                    status: STATUS_EXCEPTION,
                    service: SVC,
                    entries: vec![],
                    message: format!("Couldn't read catalog: {error}"),
                }),
            )
                .into_response()
        }
    }
}

/// `GET [/{cex}]/texts/first/{urn}`
pub async fn first(
    state: State<AppState>,
    params: Path<HashMap<String, String>>,
    query: Query<TextQuery>,
) -> Response {
    first_or_last(state, params, query, true).await
}

/// `GET [/{cex}]/texts/last/{urn}`
pub async fn last(
    state: State<AppState>,
    params: Path<HashMap<String, String>>,
    query: Query<TextQuery>,
) -> Response {
    first_or_last(state, params, query, false).await
}

async fn first_or_last(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
    pick_first: bool,
) -> Response {
    let service: &'static str = if pick_first {
        "/texts/first"
    } else {
        "/texts/last"
    };
    let urn = path_urn(&params);

    if !is_cts_urn(&urn) {
        return (
            StatusCode::BAD_REQUEST,
            Json(NodeResponse::exception(
                service,
                &urn,
                format!("{urn} is not valid CTS."),
            )),
        )
            .into_response();
    }

    let source = source_for(&state, &params, &query);
    let corpus = match corpus_for(&state, &source).await {
        Ok(c) => c,
        Err(error) => return upstream_failure(service, &urn, &source, &error),
    };

    let node = work_stem(&urn).and_then(|stem| {
        if pick_first {
            first_in_work(&corpus, &stem)
        } else {
            last_in_work(&corpus, &stem)
        }
    });
    match node {
        Some(node) => (
            StatusCode::OK,
            Json(NodeResponse::success(service, &urn, vec![node])),
        )
            .into_response(),
        None => (
            StatusCode::OK,
            Json(NodeResponse::exception(
                service,
                &urn,
                format!("No results for {urn}"),
            )),
        )
            .into_response(),
    }
}

/// `GET [/{cex}]/texts/previous/{urn}`
pub async fn previous(
    state: State<AppState>,
    params: Path<HashMap<String, String>>,
    query: Query<TextQuery>,
) -> Response {
    prev_next(state, params, query, false).await
}

/// `GET [/{cex}]/texts/next/{urn}`
pub async fn next(
    state: State<AppState>,
    params: Path<HashMap<String, String>>,
    query: Query<TextQuery>,
) -> Response {
    prev_next(state, params, query, true).await
}

async fn prev_next(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
    want_next: bool,
) -> Response {
    let service: &'static str = if want_next {
        "/texts/next"
    } else {
        "/texts/previous"
    };
    let urn = path_urn(&params);

    if !is_cts_urn(&urn) {
        return (
            StatusCode::BAD_REQUEST,
            Json(NodeResponse::exception(
                service,
                &urn,
                format!("{urn} is not valid CTS."),
            )),
        )
            .into_response();
    }

    let source = source_for(&state, &params, &query);
    let corpus = match corpus_for(&state, &source).await {
        Ok(c) => c,
        Err(error) => return upstream_failure(service, &urn, &source, &error),
    };

    let node = if want_next {
        next_of(&corpus, &urn)
    } else {
        previous_of(&corpus, &urn)
    };
    // A boundary (or unknown URN) is a successful response with no nodes.
    let nodes = node.map(|n| vec![n]).unwrap_or_default();
    (
        StatusCode::OK,
        Json(NodeResponse::success(service, &urn, nodes)),
    )
        .into_response()
}

/// `GET [/{cex}]/texts/urns/{urn}`: enumerate without materializing text.
pub async fn urns(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
) -> Response {
    const SVC: &str = "/texts/urns";
    let urn = path_urn(&params);

    if !is_cts_urn(&urn) && !is_range(&urn) {
        return (
            StatusCode::BAD_REQUEST,
            Json(UrnListResponse::exception(
                SVC,
                vec![urn.clone()],
                format!("{urn} is not valid CTS."),
            )),
        )
            .into_response();
    }

    let source = source_for(&state, &params, &query);
    let corpus = match corpus_for(&state, &source).await {
        Ok(c) => c,
        Err(error) => {
            tracing::warn!(source = %source, error = %error, "bundle unavailable");
            return (
                StatusCode::BAD_GATEWAY,
                Json(UrnListResponse::exception(
                    SVC,
                    vec![urn.clone()],
                    format!("No results for {urn}"),
                )),
            )
                .into_response();
        }
    };

    match enumerate_urns(&urn, &corpus) {
        Ok(found) => (
            StatusCode::OK,
            Json(UrnListResponse::success(SVC, vec![urn.clone()], found)),
        )
            .into_response(),
        Err(err) => {
            let status = if err.is_malformed() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(UrnListResponse::exception(
                    SVC,
                    vec![urn.clone()],
                    err.to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// `GET [/{cex}]/texts/{urn}`: the passage resolver.
pub async fn passage(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<TextQuery>,
) -> Response {
    const SVC: &str = "/texts";
    let urn = path_urn(&params);
    let source = source_for(&state, &params, &query);

    let corpus = match corpus_for(&state, &source).await {
        Ok(c) => c,
        Err(error) => return upstream_failure(SVC, &urn, &source, &error),
    };

    match resolve(&urn, &corpus, &query.filters()) {
        Ok(nodes) => (
            StatusCode::OK,
            Json(NodeResponse::success(SVC, &urn, nodes)),
        )
            .into_response(),
        Err(err) => {
            let status = if err.is_malformed() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(NodeResponse::exception(SVC, &urn, err.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_truthy_forms() {
        for s in ["1", "t", "true", "TRUE", "y", "yes", " Yes "] {
            assert!(parse_bool(s), "{s:?} should be true");
        }
        for s in ["", "0", "false", "no", "nope", "2"] {
            assert!(!parse_bool(s), "{s:?} should be false");
        }
    }

    #[test]
    fn filters_decode_leniently() {
        let q = TextQuery {
            substring: Some("abc".to_string()),
            clip: Some("true".to_string()),
            context: Some("12".to_string()),
            max_chars: Some("not-a-number".to_string()),
            tail: Some("yes".to_string()),
            cex: None,
        };
        let f = q.filters();
        assert_eq!(f.substring.as_deref(), Some("abc"));
        assert_eq!(f.clip, Some(true));
        assert_eq!(f.context, Some(12));
        assert_eq!(f.max_chars, 0);
        assert!(f.tail);
    }

    #[test]
    fn empty_clip_value_counts_as_unset() {
        let q = TextQuery {
            clip: Some("".to_string()),
            ..TextQuery::default()
        };
        assert_eq!(q.filters().clip, None);
    }

    #[test]
    fn unset_query_yields_default_filters() {
        let f = TextQuery::default().filters();
        assert_eq!(f, TextFilters::default());
    }
}
