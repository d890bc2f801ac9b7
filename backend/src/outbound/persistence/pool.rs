//! bb8-backed connection pooling for the Diesel adapter.
//!
//! Checkout is bounded by a timeout, so a saturated pool surfaces an error
//! instead of parking the caller indefinitely. That bound is what lets the
//! store honour its "no operation blocks forever" contract.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to build the pool or check a connection out of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool itself could not be constructed.
    #[error("building database pool failed: {0}")]
    Setup(String),

    /// No connection became available within the checkout timeout.
    #[error("database connection checkout failed: {0}")]
    Checkout(String),
}

/// Cloneable handle on the shared PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Connect with default sizing (10 connections, 30 second checkout).
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Setup`] when the pool cannot be constructed.
    pub async fn connect(database_url: &str) -> Result<Self, PoolError> {
        Self::with_settings(database_url, DEFAULT_MAX_CONNECTIONS, DEFAULT_CHECKOUT_TIMEOUT).await
    }

    /// Connect with explicit sizing and checkout timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Setup`] when the pool cannot be constructed.
    pub async fn with_settings(
        database_url: &str,
        max_connections: u32,
        checkout_timeout: Duration,
    ) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(max_connections)
            .connection_timeout(checkout_timeout)
            .build(manager)
            .await
            .map_err(|error| PoolError::Setup(error.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection for one unit of repository work.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection is available
    /// within the configured timeout.
    pub async fn acquire(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|error| PoolError::Checkout(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn errors_render_their_context() {
        assert_eq!(
            PoolError::Checkout("timed out".to_owned()).to_string(),
            "database connection checkout failed: timed out"
        );
        assert_eq!(
            PoolError::Setup("bad url".to_owned()).to_string(),
            "building database pool failed: bad url"
        );
    }
}
