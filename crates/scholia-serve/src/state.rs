//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::Config;

/// User-agent sent on every upstream bundle request.
pub const USER_AGENT: &str = "scholia-text-service/1.1";

/// Hard ceiling on any single bundle fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Bundles are immutable for this window; fetches within it hit the cache.
const CACHE_TTL: Duration = Duration::from_secs(120);

/// Bundle cache capacity (number of distinct source URLs).
const CACHE_CAPACITY: u64 = 64;

/// In-memory bundle cache keyed by source URL.
pub type BundleCache = Cache<String, Arc<String>>;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream HTTP client (shared connection pool).
    pub http: reqwest::Client,

    /// Service configuration.
    pub config: Arc<Config>,

    /// Fetched bundle bodies, evicted after the TTL.
    pub cache: BundleCache,
}

impl AppState {
    /// Create the application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        tracing::info!(
            cache_capacity = CACHE_CAPACITY,
            cache_ttl_secs = CACHE_TTL.as_secs(),
            fetch_timeout_secs = FETCH_TIMEOUT.as_secs(),
            "application state initialized"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            cache,
        })
    }
}
