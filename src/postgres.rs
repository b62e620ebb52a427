//! Shared `PostgreSQL` connection plumbing for the Diesel adapters.
//!
//! Diesel connections are synchronous, so every repository offloads its work
//! onto the blocking thread pool through [`run_blocking`].

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot open its initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Repository errors that can absorb infrastructure failures.
pub(crate) trait PersistenceFailure: Send + 'static {
    /// Wraps an infrastructure error as a persistence failure.
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs a Diesel operation on the blocking pool with a pooled connection.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure,
{
    let worker_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = worker_pool.get().map_err(E::from_persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_persistence)?
}
