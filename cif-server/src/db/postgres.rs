//! Postgres-backed CIF store
//!
//! Every method is one parameterized statement from `schema`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{CifKeyRow, CifRecord, CifUpdate, NewCifRecord};

use super::schema;
use super::store::{record_not_found, CifStore, DbError};

/// CIF store over the shared record pool
#[derive(Clone)]
pub struct PgCifStore {
    pool: PgPool,
}

impl PgCifStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_records(
        &self,
        sql: &'static str,
        param: &str,
    ) -> Result<Vec<CifRecord>, DbError> {
        let rows = sqlx::query_as::<_, CifRecord>(sql)
            .bind(param)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CifStore for PgCifStore {
    async fn insert(&self, record: NewCifRecord) -> Result<u64, DbError> {
        let result = sqlx::query(schema::INSERT)
            .bind(record.cif_key)
            .bind(record.member_name)
            .bind(record.spouse)
            .bind(record.sitio_purok)
            .bind(record.barangay)
            .bind(record.municipality)
            .bind(record.district)
            .bind(record.signature)
            .bind(record.picture)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<CifRecord>, DbError> {
        let rows = sqlx::query_as::<_, CifRecord>(schema::SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_key(&self, cif_key: &str) -> Result<Vec<CifRecord>, DbError> {
        self.fetch_records(schema::SELECT_BY_KEY, cif_key).await
    }

    async fn update(&self, cif_key: &str, changes: CifUpdate) -> Result<(), DbError> {
        let result = sqlx::query(schema::UPDATE_SCALARS)
            .bind(cif_key)
            .bind(changes.member_name)
            .bind(changes.spouse)
            .bind(changes.sitio_purok)
            .bind(changes.barangay)
            .bind(changes.municipality)
            .bind(changes.district)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(record_not_found(cif_key));
        }

        Ok(())
    }

    async fn search_by_name(&self, member_name: &str) -> Result<Vec<CifRecord>, DbError> {
        self.fetch_records(schema::SELECT_BY_MEMBER_NAME, member_name)
            .await
    }

    async fn list_keys(&self) -> Result<Vec<CifKeyRow>, DbError> {
        let rows = sqlx::query_as::<_, CifKeyRow>(schema::SELECT_KEYS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
