//! In-memory CIF store
//!
//! Keeps rows in insertion order behind a `RwLock` and enforces the same
//! constraints as the `cif` table (unique key, non-null member name).
//! Used by `serve --in-memory` and by router tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{CifKeyRow, CifRecord, CifUpdate, NewCifRecord};

use super::store::{record_not_found, CifStore, DbError};

#[derive(Default)]
pub struct MemoryCifStore {
    rows: RwLock<Vec<CifRecord>>,
}

impl MemoryCifStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records, kept in the given order.
    pub fn with_records(records: Vec<CifRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
        }
    }

    async fn filter<F>(&self, predicate: F) -> Vec<CifRecord>
    where
        F: Fn(&CifRecord) -> bool,
    {
        let rows = self.rows.read().await;
        rows.iter().filter(|r| predicate(r)).cloned().collect()
    }
}

#[async_trait]
impl CifStore for MemoryCifStore {
    async fn insert(&self, record: NewCifRecord) -> Result<u64, DbError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.cif_key == record.cif_key) {
            return Err(DbError::Constraint(format!(
                "duplicate key value for cif_key '{}'",
                record.cif_key
            )));
        }

        rows.push(record.into_record(Utc::now()));
        Ok(1)
    }

    async fn list(&self) -> Result<Vec<CifRecord>, DbError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_key(&self, cif_key: &str) -> Result<Vec<CifRecord>, DbError> {
        Ok(self.filter(|r| r.cif_key == cif_key).await)
    }

    async fn update(&self, cif_key: &str, mut changes: CifUpdate) -> Result<(), DbError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.cif_key == cif_key)
            .ok_or_else(|| record_not_found(cif_key))?;

        let member_name = changes.member_name.take().ok_or_else(|| {
            DbError::Constraint("null value in column member_name".to_string())
        })?;
        changes.apply_to(row, member_name);
        Ok(())
    }

    async fn search_by_name(&self, member_name: &str) -> Result<Vec<CifRecord>, DbError> {
        Ok(self.filter(|r| r.member_name == member_name).await)
    }

    async fn list_keys(&self) -> Result<Vec<CifKeyRow>, DbError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .map(|r| CifKeyRow {
                cif_key: r.cif_key.clone(),
            })
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
