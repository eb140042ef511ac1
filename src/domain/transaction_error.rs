use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A failed provider call, kept verbatim. `date` is written once on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransactionError {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub user_id: Uuid,
    pub response: String,
    pub payment_transaction_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPaymentTransactionError {
    pub user_id: Uuid,
    pub response: String,
    pub payment_transaction_id: Option<Uuid>,
}
