use crate::http::handlers::{items, ops, purchased_items, transaction_errors, transactions};
use crate::http::middleware::admin_auth::{require_admin_key, AdminKey};
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

/// Every checkout route, ready to be served or nested into a host router.
///
/// Only the catalog, a single transaction by provider id and the ops checks
/// are public. Anything that acts for a user or exposes user data sits behind
/// the admin key.
pub fn build_router(state: AppState, admin_key: String) -> Router {
    let admin_routes = Router::new()
        .route("/admin/items", post(items::create_item))
        .route(
            "/admin/items/:item_id",
            put(items::update_item).delete(items::delete_item),
        )
        .route("/admin/checkout", post(transactions::begin_checkout))
        .route("/admin/transactions", get(transactions::list_transactions))
        .route(
            "/admin/transactions/:transaction_id/purchased-items",
            get(purchased_items::list_for_transaction),
        )
        .route(
            "/admin/payment-transactions/:payment_transaction_id/confirm",
            post(transactions::confirm_checkout),
        )
        .route(
            "/admin/payment-transactions/:payment_transaction_id/cancel",
            post(transactions::cancel_checkout),
        )
        .route(
            "/admin/transaction-errors",
            get(transaction_errors::list_errors).post(transaction_errors::record_error),
        )
        .route("/admin/users/:user_id/transactions", get(transactions::list_user_transactions))
        .route("/admin/users/:user_id/purchased-items", get(purchased_items::list_for_user))
        .route("/admin/users/:user_id/purchase-totals", get(purchased_items::totals_for_user))
        .route(
            "/admin/users/:user_id/purchased-items/:item_id",
            get(purchased_items::has_purchased),
        )
        .route(
            "/admin/users/:user_id/transaction-errors",
            get(transaction_errors::list_errors_for_user),
        )
        .layer(from_fn_with_state(AdminKey(admin_key), require_admin_key));

    Router::new()
        .route("/ops/liveness", get(ops::liveness))
        .route("/ops/readiness", get(ops::readiness))
        .route("/items", get(items::list_items))
        .route("/items/:item_id", get(items::get_item))
        .route("/transactions/:transaction_id", get(transactions::get_transaction))
        .merge(admin_routes)
        .with_state(state)
}
