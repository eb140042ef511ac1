use crate::domain::transaction_error::NewPaymentTransactionError;
use crate::http::error::repo_error;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn list_errors(State(state): State<AppState>) -> impl IntoResponse {
    match state.transaction_errors_repo.list(state.list_limit).await {
        Ok(rows) => (axum::http::StatusCode::OK, Json(rows)).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn list_errors_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.transaction_errors_repo.list_for_user(user_id, state.list_limit).await {
        Ok(rows) => (axum::http::StatusCode::OK, Json(rows)).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn record_error(
    State(state): State<AppState>,
    Json(req): Json<NewPaymentTransactionError>,
) -> impl IntoResponse {
    match state.checkout_service.record_provider_error(req).await {
        Ok(row) => (axum::http::StatusCode::CREATED, Json(row)).into_response(),
        Err(e) => e.into_response(),
    }
}
