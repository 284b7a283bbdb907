//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.taskdeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::query::QueryOptions;
use crate::query::types::{
    DEFAULT_MAX_RETRY_DELAY, DEFAULT_RETRY, DEFAULT_RETRY_BASE_DELAY, DEFAULT_STALE_TIME,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TaskdeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_route: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QueryConfig {
    pub stale_time_secs: Option<u64>,
    pub retry: Option<u32>,
    pub retry_base_delay_ms: Option<u64>,
    pub max_retry_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_START_ROUTE: &str = "/";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_route: String,
    pub api_base_url: String,
    pub query: QueryOptions,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.taskdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".taskdeck").join("config.toml"))
}

/// Load config from `~/.taskdeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TaskdeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TaskdeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TaskdeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TaskdeckConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<TaskdeckConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TaskdeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Taskdeck Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_route = "/"                  # Or set TASKDECK_START_ROUTE / --route

# [api]
# base_url = "http://localhost:3000/api"   # Or set TASKDECK_API_URL / --api-url

# [query]
# stale_time_secs = 0                # 0 = refetch whenever a view mounts
# retry = 3                          # retries after the first failure
# retry_base_delay_ms = 1000         # doubled per retry
# max_retry_delay_ms = 30000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

const START_ROUTE_ENV: &str = "TASKDECK_START_ROUTE";
const API_URL_ENV: &str = "TASKDECK_API_URL";

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_route` and `cli_api_url` come from CLI flags (None = not specified).
pub fn resolve(
    config: &TaskdeckConfig,
    cli_route: Option<&str>,
    cli_api_url: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_route, cli_api_url, |name| std::env::var(name).ok())
}

/// `resolve` with the environment supplied by `env`.
fn resolve_with_env(
    config: &TaskdeckConfig,
    cli_route: Option<&str>,
    cli_api_url: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Start route: CLI → env → config → default
    let start_route = cli_route
        .map(|s| s.to_string())
        .or_else(|| env(START_ROUTE_ENV))
        .or_else(|| config.general.start_route.clone())
        .unwrap_or_else(|| DEFAULT_START_ROUTE.to_string());

    // API base URL: CLI → env → config → default
    let api_base_url = cli_api_url
        .map(|s| s.to_string())
        .or_else(|| env(API_URL_ENV))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let query = QueryOptions {
        stale_time: config
            .query
            .stale_time_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STALE_TIME),
        retry: config.query.retry.unwrap_or(DEFAULT_RETRY),
        retry_base_delay: config
            .query
            .retry_base_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_BASE_DELAY),
        max_retry_delay: config
            .query
            .max_retry_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MAX_RETRY_DELAY),
    };

    ResolvedConfig {
        start_route,
        api_base_url,
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = TaskdeckConfig::default();
        assert!(config.general.start_route.is_none());
        assert!(config.api.base_url.is_none());
        assert!(config.query.retry.is_none());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_with(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    fn file_config() -> TaskdeckConfig {
        TaskdeckConfig {
            general: GeneralConfig {
                start_route: Some("/dashboard".to_string()),
            },
            api: ApiConfig {
                base_url: Some("http://config.example/api".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&TaskdeckConfig::default(), None, None, no_env);
        assert_eq!(resolved.start_route, DEFAULT_START_ROUTE);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.query, QueryOptions::default());
    }

    #[test]
    fn test_resolve_file_overrides_defaults() {
        let resolved = resolve_with_env(&file_config(), None, None, no_env);
        assert_eq!(resolved.start_route, "/dashboard");
        assert_eq!(resolved.api_base_url, "http://config.example/api");
    }

    #[test]
    fn test_resolve_env_overrides_file() {
        let env = env_with(&[
            ("TASKDECK_START_ROUTE", "/tasks"),
            ("TASKDECK_API_URL", "http://env.example/api"),
        ]);
        let resolved = resolve_with_env(&file_config(), None, None, env);
        assert_eq!(resolved.start_route, "/tasks");
        assert_eq!(resolved.api_base_url, "http://env.example/api");
    }

    #[test]
    fn test_resolve_env_fills_gaps_only_where_set() {
        let env = env_with(&[("TASKDECK_API_URL", "http://env.example/api")]);
        let resolved = resolve_with_env(&TaskdeckConfig::default(), None, None, env);
        assert_eq!(resolved.start_route, DEFAULT_START_ROUTE);
        assert_eq!(resolved.api_base_url, "http://env.example/api");
    }

    #[test]
    fn test_resolve_cli_overrides_env() {
        let env = env_with(&[
            ("TASKDECK_START_ROUTE", "/tasks"),
            ("TASKDECK_API_URL", "http://env.example/api"),
        ]);
        let resolved = resolve_with_env(
            &file_config(),
            Some("/settings"),
            Some("http://cli.example/api"),
            env,
        );
        assert_eq!(resolved.start_route, "/settings");
        assert_eq!(resolved.api_base_url, "http://cli.example/api");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TaskdeckConfig {
            query: QueryConfig {
                stale_time_secs: Some(30),
                retry: Some(1),
                retry_base_delay_ms: Some(250),
                max_retry_delay_ms: Some(2000),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("/"), Some(DEFAULT_API_BASE_URL));
        assert_eq!(resolved.query.stale_time, Duration::from_secs(30));
        assert_eq!(resolved.query.retry, 1);
        assert_eq!(resolved.query.retry_base_delay, Duration::from_millis(250));
        assert_eq!(resolved.query.max_retry_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_resolve_cli_wins_over_config() {
        let config = TaskdeckConfig {
            general: GeneralConfig {
                start_route: Some("/dashboard".to_string()),
            },
            api: ApiConfig {
                base_url: Some("http://config.example/api".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("/tasks"), Some("http://cli.example/api"));
        assert_eq!(resolved.start_route, "/tasks");
        assert_eq!(resolved.api_base_url, "http://cli.example/api");
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
start_route = "/dashboard"

[api]
base_url = "http://192.168.1.100:3000/api"

[query]
stale_time_secs = 10
retry = 5
"#;
        let config: TaskdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_route.as_deref(), Some("/dashboard"));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://192.168.1.100:3000/api")
        );
        assert_eq!(config.query.stale_time_secs, Some(10));
        assert_eq!(config.query.retry, Some(5));
        assert!(config.query.max_retry_delay_ms.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[api]
base_url = "http://localhost:8080"
"#;
        let config: TaskdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(config.general.start_route.is_none());
        assert!(config.query.retry.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "taskdeck-config-test-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[query]\nretry = \"many\"\n").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("taskdeck-config-test-does-not-exist.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }
}
