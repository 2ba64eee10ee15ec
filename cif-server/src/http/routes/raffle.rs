//! Raffle-ticket helper: one entry per member key

use axum::{extract::State, routing::get, Json, Router};

use super::respond_rows;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::CifKeyRow;

/// GET /raffle-tickets
async fn raffle_tickets(
    State(state): State<AppState>,
) -> Result<Json<Vec<CifKeyRow>>, ApiError> {
    respond_rows(state.store.list_keys()).await
}

pub fn router() -> Router<AppState> {
    Router::new().route("/raffle-tickets", get(raffle_tickets))
}
