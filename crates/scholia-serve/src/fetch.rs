//! Bundle fetching with a read-through TTL cache, and the uncached
//! reachability probe backing `/healthz`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::RANGE;

use crate::state::AppState;

/// Health probes get a tighter ceiling than bundle fetches.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Upstream fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}: status {status}")]
    Status { url: String, status: u16 },
}

/// Fetch a bundle body, serving from the cache within the TTL window.
///
/// Misses are single-flight: concurrent requests for the same URL share
/// one upstream fetch. Failures are not cached, so the next request
/// retries.
pub async fn fetch_bundle(state: &AppState, url: &str) -> Result<Arc<String>, Arc<FetchError>> {
    state
        .cache
        .try_get_with(url.to_string(), fetch_fresh(state, url))
        .await
}

async fn fetch_fresh(state: &AppState, url: &str) -> Result<Arc<String>, FetchError> {
    tracing::debug!(url = %url, "bundle cache miss, fetching");
    let resp = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
    if resp.status() != StatusCode::OK {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    let body = resp.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    Ok(Arc::new(body))
}

/// Probe whether the source answers at all, bypassing the cache.
///
/// Tries HEAD first; some static hosts reject it, so a one-byte ranged GET
/// is the fallback, with 200 or 206 both counting as reachable.
pub async fn check_source_reachable(state: &AppState, url: &str) -> Result<(), FetchError> {
    if let Ok(resp) = state
        .http
        .head(url)
        .timeout(HEALTH_TIMEOUT)
        .send()
        .await
        && resp.status() == StatusCode::OK
    {
        return Ok(());
    }

    let resp = state
        .http
        .get(url)
        .header(RANGE, "bytes=0-0")
        .timeout(HEALTH_TIMEOUT)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
    match resp.status() {
        StatusCode::OK | StatusCode::PARTIAL_CONTENT => Ok(()),
        status => Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }),
    }
}
