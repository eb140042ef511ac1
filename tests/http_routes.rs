//! Router-level checks driven through `tower::ServiceExt::oneshot`. The pool
//! is lazy for the cases that are answered before any query runs.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use checkout_payments::domain::item::NewItem;
use checkout_payments::domain::purchased_item::NewPurchasedItem;
use checkout_payments::domain::status::TransactionStatus;
use checkout_payments::domain::transaction::NewPaymentTransaction;
use checkout_payments::http::middleware::admin_auth::ADMIN_KEY_HEADER;
use checkout_payments::http::router::build_router;
use checkout_payments::repo::users_repo::UsersRepo;
use checkout_payments::AppState;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

const KEY: &str = "test-admin-key";

fn lazy_app(admin_key: &str) -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    build_router(AppState::new(pool, 50), admin_key.to_string())
}

fn json_request(method: &str, uri: &str, key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header(ADMIN_KEY_HEADER, key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn admin_routes_reject_missing_or_wrong_key() {
    let user_id = Uuid::new_v4();
    let guarded = [
        ("POST", "/admin/items".to_string()),
        ("POST", "/admin/checkout".to_string()),
        ("GET", "/admin/transactions".to_string()),
        ("GET", format!("/admin/users/{user_id}/purchased-items")),
        ("GET", format!("/admin/users/{user_id}/transactions")),
        ("GET", "/admin/transactions/EC-1/purchased-items".to_string()),
    ];

    for (method, uri) in guarded {
        let response = lazy_app(KEY)
            .oneshot(json_request(method, &uri, None, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");

        let response = lazy_app(KEY)
            .oneshot(json_request(method, &uri, Some("wrong"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn user_data_is_not_served_without_the_admin_prefix() {
    let user_id = Uuid::new_v4();
    for uri in [
        format!("/users/{user_id}/purchased-items"),
        "/transactions".to_string(),
        "/transactions/EC-1/purchased-items".to_string(),
    ] {
        let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
        let response = lazy_app(KEY).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let response = lazy_app(KEY)
        .oneshot(json_request("POST", "/checkout", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_configured_key_locks_admin_routes() {
    let response = lazy_app("")
        .oneshot(json_request("POST", "/admin/items", Some(""), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = lazy_app("")
        .oneshot(json_request("GET", "/admin/transaction-errors", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_item_is_unprocessable() {
    let response = lazy_app(KEY)
        .oneshot(json_request(
            "POST",
            "/admin/items",
            Some(KEY),
            json!({"name": "  ", "description": "Blue, medium", "value": "12.50"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let response = lazy_app(KEY)
        .oneshot(json_request(
            "POST",
            "/admin/items",
            Some(KEY),
            json!({"name": "Widget", "description": "", "value": "12.50"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_checkout_is_unprocessable() {
    let response = lazy_app(KEY)
        .oneshot(json_request(
            "POST",
            "/admin/checkout",
            Some(KEY),
            json!({"user_id": Uuid::new_v4(), "transaction_id": "EC-EMPTY", "lines": []}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL"]
async fn deleting_a_purchased_item_conflicts(pool: PgPool) -> anyhow::Result<()> {
    let state = AppState::new(pool.clone(), 50);
    let buyer = UsersRepo { pool: pool.clone() }.create("buyer@example.com").await?;
    let widget = state
        .items_repo
        .create(&NewItem {
            name: "Widget".to_string(),
            description: "Blue, medium".to_string(),
            value: dec!(12.50),
        })
        .await?;
    let tx = state
        .transactions_repo
        .create(&NewPaymentTransaction {
            user_id: buyer.id,
            related: None,
            transaction_id: "EC-DEL".to_string(),
            value: dec!(12.50),
            status: TransactionStatus::Completed,
        })
        .await?;
    state
        .purchased_items_repo
        .create(&NewPurchasedItem {
            user_id: buyer.id,
            payment_transaction_id: tx.id,
            item_id: widget.id,
            quantity: 1,
        })
        .await?;

    let app = build_router(state.clone(), KEY.to_string());
    let response = app
        .oneshot(json_request("DELETE", &format!("/admin/items/{}", widget.id), Some(KEY), json!({})))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "ITEM_IN_USE");
    assert!(state.items_repo.get(widget.id).await?.is_some());

    let app = build_router(state, KEY.to_string());
    let response = app
        .oneshot(json_request("DELETE", &format!("/admin/items/{}", Uuid::new_v4()), Some(KEY), json!({})))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
