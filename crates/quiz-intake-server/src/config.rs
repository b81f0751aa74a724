//! Environment-sourced configuration
//!
//! The deployment is 12-factor: everything comes from environment
//! variables. The database URL is the only required value; pool sizing and
//! timeouts have defaults matching the knobs the dashboard's hosting
//! historically used (`PG_MAX`, `PG_IDLE_TIMEOUT_MS`, `PG_CONN_TIMEOUT_MS`).

use std::time::Duration;

use quiz_intake_storage::StoreConfig;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("invalid value {value:?} for {var}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("base URL has no host")]
    BaseUrlWithoutHost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    pub bind_address: String,

    /// Host (and port, when non-default) of the URL this service is served
    /// under, used for the same-origin trust decision
    pub public_host: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Shared secret for external bearer auth. Absent means external
    /// callers are always denied; same-origin callers remain usable.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub database: StoreConfig,
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDatabaseUrl` if `DATABASE_URL` is
    /// absent, and `ConfigError::InvalidNumber` for unparseable numeric
    /// overrides. Both are fatal startup conditions.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut database = StoreConfig::new(url);
        if let Some(max) = parse_env(&lookup, "PG_MAX")? {
            database.max_connections = max;
        }
        if let Some(ms) = parse_env(&lookup, "PG_IDLE_TIMEOUT_MS")? {
            database.idle_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_env(&lookup, "PG_CONN_TIMEOUT_MS")? {
            database.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("PG_KEEP_WARM") {
            database.keep_warm = matches!(raw.as_str(), "1" | "true" | "yes");
        }

        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let base_url = lookup("QUIZ_BASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        let public_host = host_of(&base_url)?;

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| format!("0.0.0.0:{}", port));

        let api_key = lookup("QUIZ_API_KEY").filter(|v| !v.is_empty());

        Ok(Self {
            server: ServerConfig {
                bind_address,
                public_host,
            },
            database,
            auth: AuthConfig { api_key },
        })
    }
}

/// Extract `host[:port]` from a base URL, the form host headers carry.
fn host_of(base_url: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(base_url)?;
    let host = parsed.host_str().ok_or(ConfigError::BaseUrlWithoutHost)?;
    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
    }
}
