use crate::domain::status::TransactionStatus;
use crate::domain::transaction::PaymentTransaction;
use crate::http::error::{not_found, repo_error};
use crate::service::checkout_service::{BeginCheckout, CheckoutLine};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: PaymentTransaction,
    pub label: String,
}

impl From<PaymentTransaction> for TransactionView {
    fn from(transaction: PaymentTransaction) -> Self {
        Self {
            label: transaction.to_string(),
            transaction,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmCheckoutRequest {
    pub status: TransactionStatus,
    pub lines: Vec<CheckoutLine>,
}

pub async fn list_transactions(State(state): State<AppState>) -> impl IntoResponse {
    match state.transactions_repo.list(state.list_limit).await {
        Ok(items) => {
            let resp: Vec<TransactionView> = items.into_iter().map(TransactionView::from).collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => repo_error(e),
    }
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    match state.transactions_repo.find_by_transaction_id(&transaction_id).await {
        Ok(Some(tx)) => (axum::http::StatusCode::OK, Json(TransactionView::from(tx))).into_response(),
        Ok(None) => not_found("transaction"),
        Err(e) => repo_error(e),
    }
}

pub async fn list_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.transactions_repo.list_for_user(user_id, state.list_limit).await {
        Ok(items) => {
            let resp: Vec<TransactionView> = items.into_iter().map(TransactionView::from).collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => repo_error(e),
    }
}

pub async fn begin_checkout(State(state): State<AppState>, Json(req): Json<BeginCheckout>) -> impl IntoResponse {
    match state.checkout_service.begin_checkout(req).await {
        Ok(tx) => (axum::http::StatusCode::CREATED, Json(TransactionView::from(tx))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn confirm_checkout(
    State(state): State<AppState>,
    Path(payment_transaction_id): Path<Uuid>,
    Json(req): Json<ConfirmCheckoutRequest>,
) -> impl IntoResponse {
    match state
        .checkout_service
        .confirm_checkout(payment_transaction_id, req.status, &req.lines)
        .await
    {
        Ok(confirmed) => (axum::http::StatusCode::OK, Json(confirmed)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn cancel_checkout(
    State(state): State<AppState>,
    Path(payment_transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.checkout_service.cancel_checkout(payment_transaction_id).await {
        Ok(tx) => (axum::http::StatusCode::OK, Json(TransactionView::from(tx))).into_response(),
        Err(e) => e.into_response(),
    }
}
