pub mod error;
pub mod router;
pub mod handlers {
    pub mod items;
    pub mod ops;
    pub mod purchased_items;
    pub mod transaction_errors;
    pub mod transactions;
}
pub mod middleware {
    pub mod admin_auth;
}
