use crate::domain::item::Item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// SQL form of the purchased-item ordering; `t` is the joined transaction.
pub const DEFAULT_ORDER_BY: &str = "t.date DESC, t.transaction_id ASC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payment_transaction_id: Uuid,
    pub item_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPurchasedItem {
    pub user_id: Uuid,
    pub payment_transaction_id: Uuid,
    pub item_id: Uuid,
    pub quantity: u32,
}

/// A purchased line with the rows its label is built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasedItemDetail {
    pub purchase: PurchasedItem,
    pub item: Item,
    pub user_email: String,
    pub transaction_id: String,
    pub transaction_date: DateTime<Utc>,
}

impl fmt::Display for PurchasedItemDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} of {} [{}]",
            self.purchase.quantity, self.item, self.user_email, self.transaction_id
        )
    }
}

pub fn default_ordering(a: &PurchasedItemDetail, b: &PurchasedItemDetail) -> Ordering {
    b.transaction_date
        .cmp(&a.transaction_date)
        .then_with(|| a.transaction_id.cmp(&b.transaction_id))
}

/// How many of one item a user has bought across all transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseTotal {
    pub item_id: Uuid,
    pub item_name: String,
    pub quantity: i64,
}
