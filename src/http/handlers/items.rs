use crate::domain::item::{Item, NewItem};
use crate::http::error::{error_response, not_found, repo_error};
use crate::repo::db_error::is_foreign_key_violation;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub label: String,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            label: item.to_string(),
            item,
        }
    }
}

pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    match state.items_repo.list().await {
        Ok(items) => {
            let resp: Vec<ItemView> = items.into_iter().map(ItemView::from).collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => repo_error(e),
    }
}

pub async fn get_item(State(state): State<AppState>, Path(item_id): Path<Uuid>) -> impl IntoResponse {
    match state.items_repo.get(item_id).await {
        Ok(Some(item)) => (axum::http::StatusCode::OK, Json(ItemView::from(item))).into_response(),
        Ok(None) => not_found("item"),
        Err(e) => repo_error(e),
    }
}

pub async fn create_item(State(state): State<AppState>, Json(req): Json<NewItem>) -> impl IntoResponse {
    match state.items_repo.create(&req).await {
        Ok(item) => (axum::http::StatusCode::CREATED, Json(ItemView::from(item))).into_response(),
        Err(e) => repo_error(e),
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<NewItem>,
) -> impl IntoResponse {
    match state.items_repo.update(item_id, &req).await {
        Ok(Some(item)) => (axum::http::StatusCode::OK, Json(ItemView::from(item))).into_response(),
        Ok(None) => not_found("item"),
        Err(e) => repo_error(e),
    }
}

pub async fn delete_item(State(state): State<AppState>, Path(item_id): Path<Uuid>) -> impl IntoResponse {
    match state.items_repo.delete(item_id).await {
        Ok(true) => axum::http::StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("item"),
        Err(e) if is_foreign_key_violation(&e) => error_response(
            axum::http::StatusCode::CONFLICT,
            "ITEM_IN_USE",
            "item is referenced by purchases",
        ),
        Err(e) => repo_error(e),
    }
}
