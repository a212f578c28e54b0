//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use person_store::PersonStore;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::persons::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
}

/// GET /health: reports whether the store answers.
pub async fn check<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let records = state.phonebook.count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        records,
    }))
}
