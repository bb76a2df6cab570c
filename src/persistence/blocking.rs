//! Connection pooling and blocking-call helpers.
//!
//! Diesel is synchronous, so every query runs on
//! [`tokio::task::spawn_blocking`] with a connection taken from the pool
//! inside the blocking closure.

use crate::config::DatabaseSettings;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool shared by all repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from database settings.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn connect(settings: &DatabaseSettings) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_connections)
        .build(manager)
}

/// Repository errors that can wrap an infrastructure failure.
pub(crate) trait FromPersistence: Send + 'static {
    /// Wraps a pool, join, or driver error.
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static;
}

/// Runs `f` with a pooled connection on the blocking thread pool.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: FromPersistence,
{
    let pool_handle = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool_handle.get().map_err(E::from_persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_persistence)?
}
