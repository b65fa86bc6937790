//! Database connection pool utilities.

use std::error::Error;

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Pooled PostgreSQL connections for the Hangar server.
pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Boxed error for pool setup failures.
pub type DbError = Box<dyn Error + Send + Sync>;

/// Embedded Diesel migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Initialize the database pool for `database_url` and run migrations.
pub fn init_pool(database_url: &str) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().build(manager)?;
    run_migrations(&pool)?;
    Ok(pool)
}

/// Run pending Diesel migrations.
pub fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("applied {} database migration(s)", applied.len());
    }
    Ok(())
}

/// Test-only pool whose single connection lives inside a rolled-back transaction.
#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set TEST_DATABASE_URL or DATABASE_URL for PostgreSQL tests");
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(RollbackOnRelease))
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .expect("pool");
    run_migrations(&pool).expect("run migrations");
    pool
}

#[cfg(test)]
#[derive(Debug)]
struct RollbackOnRelease;

#[cfg(test)]
impl r2d2::CustomizeConnection<PgConnection, r2d2::Error> for RollbackOnRelease {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        use diesel::Connection;

        conn.begin_test_transaction().map_err(r2d2::Error::QueryError)
    }
}
