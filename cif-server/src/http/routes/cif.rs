//! CIF record endpoints

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::respond_rows;
use crate::http::error::{ApiError, Operation};
use crate::http::form::CifForm;
use crate::http::server::AppState;
use crate::models::{CifRecord, CifUpdate};

/// Create response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: &'static str,
    /// Rows written by the insert
    pub insert_id: u64,
}

/// Update response
#[derive(Serialize)]
pub struct UpdatedResponse {
    pub message: &'static str,
}

/// POST /cif - insert a record from a multipart form
async fn create_cif(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let multipart = multipart.map_err(|e| ApiError::storage(Operation::Insert, e))?;
    let record = CifForm::read(multipart)
        .await
        .and_then(CifForm::into_new_record)
        .map_err(|e| ApiError::storage(Operation::Insert, e))?;

    tracing::debug!(cif_key = %record.cif_key, "Adding CIF record");
    let rows = state
        .store
        .insert(record)
        .await
        .map_err(|e| ApiError::storage(Operation::Insert, e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "CIF record added successfully",
            insert_id: rows,
        }),
    ))
}

/// GET /cif - every record
async fn list_cif(State(state): State<AppState>) -> Result<Json<Vec<CifRecord>>, ApiError> {
    respond_rows(state.store.list()).await
}

/// GET /cif/{cif_key} - zero or one records; an empty array means not found
async fn get_cif(
    State(state): State<AppState>,
    Path(cif_key): Path<String>,
) -> Result<Json<Vec<CifRecord>>, ApiError> {
    respond_rows(state.store.find_by_key(&cif_key)).await
}

/// PUT /cif/{cif_key} - overwrite the mutable scalar fields
async fn update_cif(
    State(state): State<AppState>,
    Path(cif_key): Path<String>,
    body: Result<Json<CifUpdate>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let Json(changes) = body.map_err(|e| ApiError::storage(Operation::Update, e))?;

    state
        .store
        .update(&cif_key, changes)
        .await
        .map_err(|e| ApiError::from_db(Operation::Update, e))?;

    Ok(Json(UpdatedResponse {
        message: "CIF record updated successfully",
    }))
}

/// GET /cif/search/{member_name} - exact member name match
async fn search_cif(
    State(state): State<AppState>,
    Path(member_name): Path<String>,
) -> Result<Json<Vec<CifRecord>>, ApiError> {
    respond_rows(state.store.search_by_name(&member_name)).await
}

/// CIF routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cif", get(list_cif).post(create_cif))
        .route("/cif/{cif_key}", get(get_cif).put(update_cif))
        .route("/cif/search/{member_name}", get(search_cif))
}
