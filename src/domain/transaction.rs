use crate::domain::related::RelatedObject;
use crate::domain::status::TransactionStatus;
use crate::domain::validation::{require_text, validate_money, ValidationError, TRANSACTION_ID_MAX_LEN};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// SQL form of [`default_ordering`].
pub const DEFAULT_ORDER_BY: &str = "date DESC, transaction_id ASC";

/// One payment attempt with the provider.
///
/// `date` is refreshed by every write; `transaction_id` is whatever
/// identifier the provider handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub related: Option<RelatedObject>,
    pub date: DateTime<Utc>,
    pub transaction_id: String,
    pub value: Decimal,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPaymentTransaction {
    pub user_id: Uuid,
    pub related: Option<RelatedObject>,
    pub transaction_id: String,
    pub value: Decimal,
    pub status: TransactionStatus,
}

impl NewPaymentTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.transaction_id, self.value, self.related.as_ref())
    }
}

impl PaymentTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.transaction_id, self.value, self.related.as_ref())
    }
}

fn validate_fields(
    transaction_id: &str,
    value: Decimal,
    related: Option<&RelatedObject>,
) -> Result<(), ValidationError> {
    require_text("transaction_id", transaction_id, TRANSACTION_ID_MAX_LEN)?;
    validate_money("value", value)?;
    if let Some(related) = related {
        related.validate()?;
    }
    Ok(())
}

impl fmt::Display for PaymentTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.transaction_id)
    }
}

/// Newest first, then provider id ascending.
pub fn default_ordering(a: &PaymentTransaction, b: &PaymentTransaction) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| a.transaction_id.cmp(&b.transaction_id))
}

pub fn sort_default(transactions: &mut [PaymentTransaction]) {
    transactions.sort_by(default_ordering);
}
