//! Database configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default maximum pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default connection checkout timeout, in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Configuration values for the PostgreSQL connection pool.
///
/// Values merge from the environment (prefix `DATABASE_`, so the connection
/// string is the conventional `DATABASE_URL`), configuration files, and CLI
/// arguments per OrthoConfig's layering rules.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    /// PostgreSQL connection string.
    pub url: Option<String>,
    /// Maximum number of pooled connections.
    #[ortho_config(default = 10)]
    pub max_connections: u32,
    /// Minimum number of idle connections to maintain.
    pub min_idle: Option<u32>,
    /// Connection checkout timeout, in seconds.
    #[ortho_config(default = 30)]
    pub connect_timeout_secs: u64,
}

impl DatabaseSettings {
    /// Settings with defaults and no connection URL.
    pub fn unconfigured() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Settings with defaults and the given connection URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::unconfigured()
        }
    }

    /// Configured connection URL, when one is set.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Connection checkout timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
