//! # Client configuration and API base-address resolution
//!
//! [`ApiConfig`] is handed to the [`Gateway`](crate::Gateway) at construction
//! time. Before every call the gateway asks it for a base address, given the
//! hostname the app is being viewed from. The rules are applied in order:
//!
//! | # | Rule | Result |
//! |---|------|--------|
//! | 1 | [`BaseRule::Override`] | `api_url`, trimmed, trailing `/` removed (ignored when blank) |
//! | 2 | [`BaseRule::Loopback`] | `local_url` when the hostname is `localhost`, `127.0.0.1` or empty |
//! | 3 |: | [`ConfigError::MissingApiUrl`] |
//!
//! There is no hardcoded production address: a deployed build without
//! `TASKS_API_URL` fails loudly instead of talking to the wrong backend.
//!
//! ## Sources
//!
//! - Native: [`ApiConfig::load`] reads `.env`, then an optional `tasks.toml`,
//!   then `TASKS_API_URL` / `TASKS_API_LOCAL` from the environment.
//! - Web: [`ApiConfig::from_build_env`] uses the `TASKS_API_URL` value captured
//!   when the bundle was compiled.
//!
//! ```toml
//! [api]
//! url = "https://tasks.example.com"
//! local = "http://localhost:8000"
//! ```

use serde::Deserialize;

/// Backend address used when the app is served from a loopback host.
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8000";

/// Optional configuration file read by [`ApiConfig::load`].
pub const CONFIG_FILE: &str = "tasks.toml";

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", ""];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TASKS_API_URL is not configured and host {hostname:?} is not a loopback address")]
    MissingApiUrl { hostname: String },
    #[error("failed to load configuration: {0}")]
    Load(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        Self::Load(e.to_string())
    }
}

/// Which resolution rule produced a base address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseRule {
    Override,
    Loopback,
}

/// A resolved API base address, without trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBase {
    pub url: String,
    pub rule: BaseRule,
}

/// API client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Explicit backend address. Wins over every other rule.
    #[serde(default, rename = "url")]
    pub api_url: Option<String>,
    /// Backend address for loopback hosts.
    #[serde(default = "default_local_url", rename = "local")]
    pub local_url: String,
}

fn default_local_url() -> String {
    DEFAULT_LOCAL_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            local_url: default_local_url(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    api: ApiConfig,
}

/// `TASKS_API_URL` → `api.url`, `TASKS_API_LOCAL` → `api.local`.
#[cfg(not(target_arch = "wasm32"))]
fn environment() -> config::Environment {
    config::Environment::with_prefix("TASKS").separator("_")
}

impl ApiConfig {
    /// Config pointing every host at `url`.
    pub fn with_api_url(url: impl Into<String>) -> Self {
        Self {
            api_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Load from `.env`, `tasks.toml` and `TASKS_*` environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_FILE, environment())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_from(file: &str, env: config::Environment) -> Result<Self, ConfigError> {
        use config::{Config, File, FileFormat};

        let settings = Config::builder()
            .set_default("api.local", DEFAULT_LOCAL_URL)?
            .add_source(File::with_name(file).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        Ok(settings.api)
    }

    /// Config baked in at compile time, for browser builds.
    pub fn from_build_env() -> Self {
        Self {
            api_url: option_env!("TASKS_API_URL").map(str::to_string),
            ..Self::default()
        }
    }

    /// Resolve the API base address for a page served from `hostname`.
    pub fn resolve(&self, hostname: &str) -> Result<ResolvedBase, ConfigError> {
        if let Some(url) = self
            .api_url
            .as_deref()
            .map(normalize_base)
            .filter(|url| !url.is_empty())
        {
            return Ok(ResolvedBase {
                url,
                rule: BaseRule::Override,
            });
        }

        if is_loopback(hostname) {
            return Ok(ResolvedBase {
                url: normalize_base(&self.local_url),
                rule: BaseRule::Loopback,
            });
        }

        Err(ConfigError::MissingApiUrl {
            hostname: hostname.to_string(),
        })
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn is_loopback(hostname: &str) -> bool {
    let host = hostname.trim();
    LOOPBACK_HOSTS
        .iter()
        .any(|candidate| host.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_and_is_normalized() {
        let config = ApiConfig::with_api_url("  https://api.example.com///  ");
        let resolved = config.resolve("localhost").unwrap();
        assert_eq!(resolved.url, "https://api.example.com");
        assert_eq!(resolved.rule, BaseRule::Override);

        let resolved = config.resolve("tasks.example.com").unwrap();
        assert_eq!(resolved.url, "https://api.example.com");
    }

    #[test]
    fn test_loopback_hosts_use_local_default() {
        let config = ApiConfig::default();
        for host in ["localhost", "127.0.0.1", "", "LOCALHOST"] {
            let resolved = config.resolve(host).unwrap();
            assert_eq!(resolved.url, "http://localhost:8000");
            assert_eq!(resolved.rule, BaseRule::Loopback);
        }
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = ApiConfig::with_api_url("   ");
        assert_eq!(config.resolve("").unwrap().rule, BaseRule::Loopback);
    }

    #[test]
    fn test_remote_host_without_override_fails() {
        let err = ApiConfig::default()
            .resolve("tasks.example.com")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiUrl { ref hostname } if hostname == "tasks.example.com"));
        assert!(err.to_string().contains("TASKS_API_URL"));
    }

    #[test]
    fn test_load_from_environment() {
        let vars = config::Map::from([(
            "TASKS_API_URL".to_string(),
            "https://env.example.com/".to_string(),
        )]);
        let config =
            ApiConfig::load_from("tasks.missing", environment().source(Some(vars))).unwrap();

        assert_eq!(config.api_url.as_deref(), Some("https://env.example.com/"));
        assert_eq!(config.local_url, DEFAULT_LOCAL_URL);
        assert_eq!(
            config.resolve("tasks.example.com").unwrap().url,
            "https://env.example.com"
        );
    }
}
