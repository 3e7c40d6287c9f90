//! Persistence for the question bank.
//!
//! - [`store`] -- the [`DocumentStore`](store::DocumentStore) trait and its
//!   in-memory and PostgreSQL backends.
//! - [`repositories`] -- record and user operations on top of a store.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod repositories;
pub mod store;

pub use error::DbError;
pub use sqlx;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
