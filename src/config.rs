//! TOML configuration and backend URL resolution.
//!
//! All deployment settings live in one [`Config`] object that is loaded
//! and resolved once at startup. The resolved API base URL is what the
//! [`ApiClient`](crate::http::ApiClient) sends every request to.
//!
//! # Resolution order
//!
//! 1. `BRIEF_BACKEND_URL` environment variable
//! 2. `[backend].url` from the config file
//! 3. Derived from the hostname the client runs against:
//!    - `localhost` / `127.0.0.1` → `http://<host>:<local_port>`
//!    - anything else → `https://<host>` (`http://` when `use_https = false`)
//!
//! The `[backend].api_prefix` (default `/api`) is appended exactly once.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides every other backend URL source.
pub const BACKEND_URL_ENV: &str = "BRIEF_BACKEND_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub dev_server: DevServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Explicit backend origin, e.g. `https://briefs.example.com`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_use_https")]
    pub use_https: bool,
    #[serde(default = "default_local_port")]
    pub local_port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            use_https: default_use_https(),
            local_port: default_local_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

fn default_use_https() -> bool {
    true
}
fn default_local_port() -> u16 {
    8001
}
fn default_api_prefix() -> String {
    "/api".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DevServerConfig {
    #[serde(default = "default_dev_port")]
    pub port: u16,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: default_dev_port(),
        }
    }
}

fn default_dev_port() -> u16 {
    3000
}

impl Config {
    /// Build a config pointing straight at `url`, with all other settings
    /// at their defaults. Used by tests and embedders that already know
    /// where the backend lives.
    pub fn with_backend_url(url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                url: Some(url.into()),
                ..BackendConfig::default()
            },
            dev_server: DevServerConfig::default(),
        }
    }

    /// Resolve the API base URL for a client running against `hostname`.
    ///
    /// Reads [`BACKEND_URL_ENV`] from the process environment.
    pub fn resolve_base_url(&self, hostname: &str) -> Result<String> {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        self.resolve_base_url_with(env_url.as_deref(), hostname)
    }

    /// Same as [`resolve_base_url`](Self::resolve_base_url) with the
    /// environment override passed in explicitly.
    pub fn resolve_base_url_with(&self, env_url: Option<&str>, hostname: &str) -> Result<String> {
        let backend = &self.backend;

        let origin = match env_url
            .filter(|u| !u.trim().is_empty())
            .or(backend.url.as_deref())
        {
            Some(url) => {
                let url = url.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    bail!("backend url must start with http:// or https://: '{}'", url);
                }
                match url.strip_prefix("http://") {
                    Some(rest) if backend.use_https && !is_local_host(host_of(rest)) => {
                        format!("https://{}", rest)
                    }
                    _ => url.to_string(),
                }
            }
            None => {
                let host = hostname.trim();
                if host.is_empty() {
                    bail!("cannot derive backend url from an empty hostname");
                }
                if is_local_host(host) {
                    format!("http://{}:{}", host, backend.local_port)
                } else if backend.use_https {
                    format!("https://{}", host)
                } else {
                    format!("http://{}", host)
                }
            }
        };

        let prefix = backend.api_prefix.trim_end_matches('/');
        if prefix.is_empty() || path_of(&origin).ends_with(prefix) {
            Ok(origin)
        } else {
            Ok(format!("{}{}", origin, prefix))
        }
    }
}

fn host_of(authority_and_path: &str) -> &str {
    let authority = authority_and_path
        .split('/')
        .next()
        .unwrap_or(authority_and_path);
    authority.split(':').next().unwrap_or(authority)
}

/// Path part of `scheme://authority/path`; empty when there is none.
fn path_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.find('/').map_or("", |i| &rest[i..])
}

fn is_local_host(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1"
}

/// Load and validate the configuration file.
///
/// A missing file is not an error: every setting has a default, and the
/// backend URL can come from the environment instead.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if let Some(url) = &config.backend.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("backend.url must start with http:// or https://");
        }
    }

    if config.backend.local_port == 0 {
        bail!("backend.local_port must be > 0");
    }

    let prefix = &config.backend.api_prefix;
    if !prefix.is_empty() && !prefix.starts_with('/') {
        bail!("backend.api_prefix must start with '/' (got '{}')", prefix);
    }

    if config.dev_server.port == 0 {
        bail!("dev_server.port must be > 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_uses_plain_http_and_local_port() {
        let cfg = Config::default();
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "http://localhost:8001/api");

        let url = cfg.resolve_base_url_with(None, "127.0.0.1").unwrap();
        assert_eq!(url, "http://127.0.0.1:8001/api");
    }

    #[test]
    fn remote_host_uses_https() {
        let cfg = Config::default();
        let url = cfg
            .resolve_base_url_with(None, "briefs.example.com")
            .unwrap();
        assert_eq!(url, "https://briefs.example.com/api");
    }

    #[test]
    fn remote_host_without_https() {
        let mut cfg = Config::default();
        cfg.backend.use_https = false;
        let url = cfg.resolve_base_url_with(None, "intranet").unwrap();
        assert_eq!(url, "http://intranet/api");
    }

    #[test]
    fn env_override_wins_over_config_url() {
        let cfg = Config::with_backend_url("https://configured.example.com");
        let url = cfg
            .resolve_base_url_with(Some("http://localhost:9000"), "ignored")
            .unwrap();
        assert_eq!(url, "http://localhost:9000/api");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let cfg = Config::with_backend_url("https://configured.example.com");
        let url = cfg.resolve_base_url_with(Some("  "), "ignored").unwrap();
        assert_eq!(url, "https://configured.example.com/api");
    }

    #[test]
    fn plain_http_remote_url_is_upgraded() {
        let cfg = Config::with_backend_url("http://briefs.example.com/");
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "https://briefs.example.com/api");
    }

    #[test]
    fn plain_http_local_url_is_kept() {
        let cfg = Config::with_backend_url("http://127.0.0.1:8001");
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "http://127.0.0.1:8001/api");
    }

    #[test]
    fn prefix_is_not_doubled() {
        let cfg = Config::with_backend_url("https://briefs.example.com/api");
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "https://briefs.example.com/api");
    }

    #[test]
    fn host_named_like_the_prefix_still_gets_prefix() {
        let cfg = Config::default();
        let url = cfg.resolve_base_url_with(None, "api").unwrap();
        assert_eq!(url, "https://api/api");

        let cfg = Config::with_backend_url("https://api");
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "https://api/api");

        let mut cfg = Config::with_backend_url("http://api:8001/");
        cfg.backend.use_https = false;
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "http://api:8001/api");
    }

    #[test]
    fn path_of_skips_scheme_and_authority() {
        assert_eq!(path_of("https://api"), "");
        assert_eq!(path_of("https://host:9/api"), "/api");
        assert_eq!(path_of("http://host/v1/api"), "/v1/api");
    }

    #[test]
    fn empty_prefix_leaves_origin_alone() {
        let mut cfg = Config::with_backend_url("http://localhost:4000");
        cfg.backend.api_prefix = String::new();
        let url = cfg.resolve_base_url_with(None, "localhost").unwrap();
        assert_eq!(url, "http://localhost:4000");
    }

    #[test]
    fn rejects_non_http_url() {
        let cfg = Config::with_backend_url("ftp://briefs.example.com");
        assert!(cfg.resolve_base_url_with(None, "localhost").is_err());
    }

    #[test]
    fn rejects_empty_hostname() {
        let cfg = Config::default();
        assert!(cfg.resolve_base_url_with(None, "").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml")).unwrap();
        assert!(cfg.backend.url.is_none());
        assert!(cfg.backend.use_https);
        assert_eq!(cfg.backend.local_port, 8001);
        assert_eq!(cfg.dev_server.port, 3000);
    }

    #[test]
    fn load_parses_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.toml");
        std::fs::write(
            &path,
            r#"
[backend]
url = "https://briefs.example.com"
use_https = false
local_port = 9001
api_prefix = "/v1"

[dev_server]
port = 5173
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.backend.url.as_deref(), Some("https://briefs.example.com"));
        assert!(!cfg.backend.use_https);
        assert_eq!(cfg.backend.local_port, 9001);
        assert_eq!(cfg.backend.api_prefix, "/v1");
        assert_eq!(cfg.dev_server.port, 5173);
    }

    #[test]
    fn load_rejects_bad_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.toml");
        std::fs::write(&path, "[backend]\napi_prefix = \"api\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("api_prefix"));
    }

    #[test]
    fn load_rejects_zero_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.toml");
        std::fs::write(&path, "[dev_server]\nport = 0\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
