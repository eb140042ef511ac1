use crate::domain::purchased_item::PurchasedItemDetail;
use crate::http::error::{not_found, repo_error};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PurchasedItemView {
    #[serde(flatten)]
    pub detail: PurchasedItemDetail,
    pub label: String,
}

fn views(details: Vec<PurchasedItemDetail>) -> Vec<PurchasedItemView> {
    details
        .into_iter()
        .map(|detail| PurchasedItemView {
            label: detail.to_string(),
            detail,
        })
        .collect()
}

pub async fn list_for_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    let tx = match state.transactions_repo.find_by_transaction_id(&transaction_id).await {
        Ok(Some(tx)) => tx,
        Ok(None) => return not_found("transaction"),
        Err(e) => return repo_error(e),
    };

    match state.purchased_items_repo.list_for_transaction(tx.id).await {
        Ok(details) => (axum::http::StatusCode::OK, Json(views(details))).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn list_for_user(State(state): State<AppState>, Path(user_id): Path<Uuid>) -> impl IntoResponse {
    match state.purchased_items_repo.list_for_user(user_id, state.list_limit).await {
        Ok(details) => (axum::http::StatusCode::OK, Json(views(details))).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn totals_for_user(State(state): State<AppState>, Path(user_id): Path<Uuid>) -> impl IntoResponse {
    match state.purchased_items_repo.totals_for_user(user_id).await {
        Ok(totals) => (axum::http::StatusCode::OK, Json(totals)).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn has_purchased(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.purchased_items_repo.has_purchased(user_id, item_id).await {
        Ok(found) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"user_id": user_id, "item_id": item_id, "purchased": found})),
        )
            .into_response(),
        Err(e) => repo_error(e),
    }
}
