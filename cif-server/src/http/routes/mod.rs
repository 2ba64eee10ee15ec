//! Route handlers organized by resource

pub mod cif;
pub mod health;
pub mod raffle;

use std::future::Future;

use axum::Json;
use serde::Serialize;

use crate::db::DbError;
use crate::http::error::{ApiError, Operation};

/// Shared read path: run the query, return every row as a JSON array.
///
/// Any storage error becomes the generic query failure.
pub(crate) async fn respond_rows<T, F>(query: F) -> Result<Json<Vec<T>>, ApiError>
where
    T: Serialize,
    F: Future<Output = Result<Vec<T>, DbError>>,
{
    query
        .await
        .map(Json)
        .map_err(|e| ApiError::storage(Operation::Query, e))
}
