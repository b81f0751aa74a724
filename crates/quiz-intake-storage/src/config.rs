//! Store configuration

use std::time::Duration;

/// Connection-pool configuration for the submission store.
///
/// All knobs have defaults; only the connection string is required (and its
/// absence is a startup failure raised by the caller's config layer, before
/// this struct is ever built).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum concurrent connections in the pool
    pub max_connections: u32,

    /// Idle connections are released after this long
    pub idle_timeout: Duration,

    /// Acquiring a connection fails after this long
    pub connect_timeout: Duration,

    /// Keep one connection warm instead of letting the pool drain to zero
    pub keep_warm: bool,
}

impl StoreConfig {
    /// Configuration with default pool sizing for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            idle_timeout: default_idle_timeout(),
            connect_timeout: default_connect_timeout(),
            keep_warm: true,
        }
    }
}

pub(crate) fn default_max_connections() -> u32 {
    5
}

pub(crate) fn default_idle_timeout() -> Duration {
    Duration::from_millis(10_000)
}

pub(crate) fn default_connect_timeout() -> Duration {
    Duration::from_millis(5_000)
}
