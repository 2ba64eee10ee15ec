//! Record pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is opened
//! once at startup and never torn down explicitly.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

use super::DbError;

/// Create the record pool from configuration.
///
/// # Errors
///
/// Returns an error if the configuration is malformed or the first
/// connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default()).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let options = config.connect_options()?;

    tracing::info!(
        db = %config.describe(),
        max_connections = config.max_connections,
        "Connecting to database"
    );
    let pool = create_pool_with_options(options, config.max_connections).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}

/// Create a PostgreSQL connection pool with explicit connect options.
///
/// # Arguments
///
/// * `options` - Driver connect options (host, credentials, session settings)
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
