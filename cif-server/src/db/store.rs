//! The storage seam between handlers and the database.

use async_trait::async_trait;

use crate::config::ConfigError;
use crate::models::{CifKeyRow, CifRecord, CifUpdate, NewCifRecord};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Operations over the `cif` table.
///
/// Each call is a single statement; there is no cross-call transaction.
#[async_trait]
pub trait CifStore: Send + Sync {
    /// Insert a new record. Returns the number of rows written.
    async fn insert(&self, record: NewCifRecord) -> Result<u64, DbError>;

    /// Every record, in storage order.
    async fn list(&self) -> Result<Vec<CifRecord>, DbError>;

    /// Records whose key equals `cif_key` (zero or one).
    async fn find_by_key(&self, cif_key: &str) -> Result<Vec<CifRecord>, DbError>;

    /// Overwrite the six mutable scalar columns.
    ///
    /// Returns `DbError::NotFound` when no row has `cif_key`.
    async fn update(&self, cif_key: &str, changes: CifUpdate) -> Result<(), DbError>;

    /// Records whose member name equals `member_name` exactly.
    async fn search_by_name(&self, member_name: &str) -> Result<Vec<CifRecord>, DbError>;

    /// The key of every record.
    async fn list_keys(&self) -> Result<Vec<CifKeyRow>, DbError>;

    /// Short backend name for health output.
    fn backend(&self) -> &'static str;
}

pub(crate) fn record_not_found(cif_key: &str) -> DbError {
    DbError::NotFound {
        resource: "CIF record",
        id: cif_key.to_owned(),
    }
}
