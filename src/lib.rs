pub mod config;
pub mod domain {
    pub mod item;
    pub mod purchased_item;
    pub mod related;
    pub mod status;
    pub mod transaction;
    pub mod transaction_error;
    pub mod user;
    pub mod validation;
}
pub mod http;
pub mod repo {
    pub mod db_error;
    pub mod items_repo;
    pub mod purchased_items_repo;
    pub mod transaction_errors_repo;
    pub mod transactions_repo;
    pub mod users_repo;
}
pub mod service {
    pub mod checkout_service;
}

use repo::items_repo::ItemsRepo;
use repo::purchased_items_repo::PurchasedItemsRepo;
use repo::transaction_errors_repo::TransactionErrorsRepo;
use repo::transactions_repo::TransactionsRepo;
use service::checkout_service::CheckoutService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub checkout_service: CheckoutService,
    pub items_repo: ItemsRepo,
    pub transactions_repo: TransactionsRepo,
    pub purchased_items_repo: PurchasedItemsRepo,
    pub transaction_errors_repo: TransactionErrorsRepo,
    pub list_limit: i64,
}

impl AppState {
    pub fn new(pool: PgPool, list_limit: i64) -> Self {
        let checkout_service = CheckoutService::new(pool);
        Self {
            items_repo: checkout_service.items_repo.clone(),
            transactions_repo: checkout_service.transactions_repo.clone(),
            purchased_items_repo: checkout_service.purchased_items_repo.clone(),
            transaction_errors_repo: checkout_service.transaction_errors_repo.clone(),
            checkout_service,
            list_limit,
        }
    }
}

/// Runs the bundled schema migrations against `pool`.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
