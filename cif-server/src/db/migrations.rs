//! Schema bootstrap for the `cif` table

use sqlx::PgPool;

use super::{schema, DbError};

/// Create the `cif` table and its name index if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running CIF migrations...");

    sqlx::query(schema::CREATE_TABLE).execute(pool).await?;
    sqlx::query(schema::CREATE_MEMBER_NAME_INDEX)
        .execute(pool)
        .await?;

    tracing::info!("CIF migrations complete");
    Ok(())
}
