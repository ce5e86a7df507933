//! Async-safe connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8` to provide an ergonomic async connection
//! pool for the persistence layer. Pool sizing and checkout timeouts come
//! from [`DatabaseSettings`] so binaries and tests configure one thing.

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::config::DatabaseSettings;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The database settings were incomplete.
    #[error("database settings are incomplete: {message}")]
    Configuration {
        /// Description of the missing or invalid setting.
        message: String,
    },
    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Failure description from the pool builder.
        message: String,
    },
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Failure description from the pool.
        message: String,
    },
}

impl PoolError {
    /// Create a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }
}

/// Async connection pool for PostgreSQL via Diesel.
///
/// # Example
///
/// ```ignore
/// let settings = DatabaseSettings::with_url("postgres://localhost/directory");
/// let pool = DbPool::connect(&settings).await?;
/// let mut conn = pool.get().await?;
/// ```
#[derive(Clone, Debug)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a connection pool from database settings.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Configuration`] when no database URL is set and
    /// [`PoolError::Build`] when the pool cannot be constructed.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, PoolError> {
        let url = settings
            .url()
            .ok_or_else(|| PoolError::configuration("database URL is not set"))?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(url);

        let pool = Pool::builder()
            .max_size(settings.max_connections)
            .min_idle(settings.min_idle)
            .connection_timeout(settings.connect_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] if a connection cannot be obtained
    /// within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
