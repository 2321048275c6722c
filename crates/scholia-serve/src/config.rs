//! Service configuration loaded from a JSON file.
//!
//! The file path comes from `--config` / the `CONFIG` env var and defaults
//! to `./config.json`. `cex_source` may name a single `.cex` file (URL or
//! path) or a directory base that request-supplied slugs are resolved
//! against; `test_cex_source` is the fallback when neither applies.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listen host (empty means all interfaces).
    #[serde(default)]
    pub host: String,

    /// Listen port, with or without a leading colon.
    #[serde(default)]
    pub port: String,

    /// Bundle source: a `.cex` file, or a directory base for slugs.
    #[serde(default)]
    pub cex_source: String,

    /// Fallback bundle used when no source or slug applies.
    #[serde(default)]
    pub test_cex_source: String,
}

impl Config {
    /// Load and decode the configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("open config {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&raw)
            .with_context(|| format!("decode config {}", path.display()))?;

        tracing::info!(
            host = %cfg.host,
            port = %cfg.port,
            cex_source = %cfg.cex_source,
            test_cex_source = %cfg.test_cex_source,
            "configuration loaded"
        );
        Ok(cfg)
    }

    /// The address to bind, normalizing an empty host and a bare or
    /// colon-prefixed port.
    pub fn listen_addr(&self) -> String {
        let host = if self.host.is_empty() {
            "0.0.0.0"
        } else {
            self.host.as_str()
        };
        let port = self.port.trim_start_matches(':');
        let port = if port.is_empty() { "8080" } else { port };
        format!("{host}:{port}")
    }

    /// Map a request's optional CEX slug onto a concrete source.
    ///
    /// An explicit `.cex` source always wins; a directory base resolves
    /// `<base>/<slug>.cex` when a slug (path segment first, then the `cex`
    /// query parameter) is present; otherwise the test fallback applies.
    pub fn pick_source(&self, cex_path: Option<&str>, cex_query: Option<&str>) -> String {
        let slug = cex_path
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| cex_query.map(str::trim).filter(|s| !s.is_empty()));

        let base = self.cex_source.trim();
        if base.to_lowercase().ends_with(".cex") {
            return base.to_string();
        }
        if !base.is_empty()
            && let Some(slug) = slug
        {
            let sep = if base.ends_with('/') { "" } else { "/" };
            return format!("{base}{sep}{slug}.cex");
        }
        self.test_cex_source.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_reads_all_fields() {
        let f = write_config(
            r#"{"host":"127.0.0.1","port":"9000","cex_source":"https://x.test/corpora","test_cex_source":"https://x.test/test.cex"}"#,
        );
        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, "9000");
        assert_eq!(cfg.cex_source, "https://x.test/corpora");
        assert_eq!(cfg.test_cex_source, "https://x.test/test.cex");
    }

    #[test]
    fn load_defaults_missing_fields() {
        let f = write_config("{}");
        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
        assert!(cfg.cex_source.is_empty());
    }

    #[test]
    fn load_fails_on_missing_file() {
        assert!(Config::load("/nonexistent/config.json").is_err());
    }

    #[test]
    fn load_fails_on_invalid_json() {
        let f = write_config("not json");
        assert!(Config::load(f.path()).is_err());
    }

    #[test]
    fn listen_addr_normalizes_port_forms() {
        let cfg = Config {
            port: ":3000".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");

        let cfg = Config {
            host: "localhost".to_string(),
            port: "3000".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.listen_addr(), "localhost:3000");
    }

    #[test]
    fn explicit_cex_file_wins() {
        let cfg = Config {
            cex_source: "https://x.test/fixed.CEX".to_string(),
            test_cex_source: "https://x.test/test.cex".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.pick_source(Some("other"), None),
            "https://x.test/fixed.CEX"
        );
    }

    #[test]
    fn directory_base_appends_slug() {
        let cfg = Config {
            cex_source: "https://x.test/corpora".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.pick_source(Some("iliad"), None),
            "https://x.test/corpora/iliad.cex"
        );
    }

    #[test]
    fn directory_base_keeps_existing_slash() {
        let cfg = Config {
            cex_source: "https://x.test/corpora/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.pick_source(Some("iliad"), None),
            "https://x.test/corpora/iliad.cex"
        );
    }

    #[test]
    fn query_slug_is_a_fallback_for_the_path() {
        let cfg = Config {
            cex_source: "https://x.test/corpora".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.pick_source(None, Some("odyssey")),
            "https://x.test/corpora/odyssey.cex"
        );
        assert_eq!(
            cfg.pick_source(Some("iliad"), Some("odyssey")),
            "https://x.test/corpora/iliad.cex"
        );
    }

    #[test]
    fn missing_slug_falls_back_to_test_source() {
        let cfg = Config {
            cex_source: "https://x.test/corpora".to_string(),
            test_cex_source: "https://x.test/test.cex".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.pick_source(None, None), "https://x.test/test.cex");
        assert_eq!(cfg.pick_source(Some("  "), None), "https://x.test/test.cex");
    }

    #[test]
    fn empty_source_always_uses_test_source() {
        let cfg = Config {
            test_cex_source: "https://x.test/test.cex".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.pick_source(Some("iliad"), None), "https://x.test/test.cex");
    }
}
