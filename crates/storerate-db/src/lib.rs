//! # Store Rating DB
//!
//! Connection pool construction and embedded schema migrations.
//!
//! The pool is built once at startup from [`DatabaseConfig`], handed to the
//! application state, and closed explicitly after the server drains.
//!
//! # Example
//!
//! ```ignore
//! use storerate_config::DatabaseConfig;
//! use storerate_db::{close_db_pool, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! // ... serve requests ...
//! close_db_pool(&pool).await;
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument};

use storerate_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Pool settings derived from configuration, without connecting.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
}

/// Connects a PostgreSQL pool and verifies it with a first connection.
#[instrument(skip(config), fields(db.max_connections = config.max_connections))]
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config).connect(&config.url).await?;
    info!("Database pool established");
    Ok(pool)
}

/// Waits for checked-out connections to return, then closes the pool.
pub async fn close_db_pool(pool: &PgPool) {
    pool.close().await;
    info!("Database pool closed");
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pool_options_follow_config() {
        let config = DatabaseConfig {
            url: "postgres://postgres@localhost:5432/store_rating_db".to_string(),
            max_connections: 7,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(45),
        };

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_migrations_are_embedded() {
        assert!(MIGRATOR.iter().count() >= 1);
    }
}
