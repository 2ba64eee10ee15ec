//! API error types with IntoResponse
//!
//! Storage failures are logged with detail and answered with a fixed,
//! per-operation message. The only other outcome is a 404 on update.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// Which kind of statement failed; selects the public error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Query,
    Update,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Insert => "Failed to add CIF record",
            Self::Query => "Failed to execute query",
            Self::Update => "Failed to update CIF record",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Query => write!(f, "query"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Anything rejected on the way to or inside storage (500, logged)
    Storage { op: Operation, detail: String },

    /// Update target absent (404)
    NotFound { resource: &'static str, id: String },
}

impl ApiError {
    pub fn storage(op: Operation, detail: impl fmt::Display) -> Self {
        Self::Storage {
            op,
            detail: detail.to_string(),
        }
    }

    /// Map a storage error, keeping `NotFound` as a 404.
    pub fn from_db(op: Operation, e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::storage(op, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Storage { op, detail } => {
                // Log the actual error, return generic message
                tracing::error!(%op, "Error executing {}: {}", op, detail);
                json!({ "error": op.failure_message() })
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(%id, "{} not found", resource);
                json!({ "message": format!("{} not found", resource) })
            }
        };

        (status, Json(body)).into_response()
    }
}
