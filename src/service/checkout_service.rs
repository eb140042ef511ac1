use crate::domain::item::Item;
use crate::domain::purchased_item::{NewPurchasedItem, PurchasedItem};
use crate::domain::related::RelatedObject;
use crate::domain::status::TransactionStatus;
use crate::domain::transaction::{NewPaymentTransaction, PaymentTransaction};
use crate::domain::transaction_error::{NewPaymentTransactionError, PaymentTransactionError};
use crate::domain::validation::{validate_money, validate_quantity, ValidationError};
use crate::repo::db_error::{is_check_violation, is_foreign_key_violation, is_unique_violation};
use crate::repo::items_repo::ItemsRepo;
use crate::repo::purchased_items_repo::PurchasedItemsRepo;
use crate::repo::transaction_errors_repo::TransactionErrorsRepo;
use crate::repo::transactions_repo::TransactionsRepo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for CheckoutError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            return CheckoutError::Validation(validation.clone());
        }
        if is_foreign_key_violation(&err) || is_unique_violation(&err) || is_check_violation(&err) {
            return CheckoutError::Integrity(err.to_string());
        }
        CheckoutError::Internal(err)
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::from(anyhow::Error::from(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub item_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeginCheckout {
    pub user_id: Uuid,
    pub transaction_id: String,
    pub lines: Vec<CheckoutLine>,
    pub related: Option<RelatedObject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedCheckout {
    pub transaction: PaymentTransaction,
    /// Lines written by this call; lines already present are skipped.
    pub purchased: Vec<PurchasedItem>,
}

/// Folds repeated items into one line, keeping first-seen order.
pub fn merge_lines(lines: &[CheckoutLine]) -> Result<Vec<CheckoutLine>, ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCheckout);
    }

    let mut merged: Vec<CheckoutLine> = Vec::with_capacity(lines.len());
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    for line in lines {
        match index.get(&line.item_id).copied() {
            Some(i) => {
                let total = merged[i]
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(ValidationError::QuantityOutOfRange(u32::MAX))?;
                merged[i].quantity = total;
            }
            None => {
                index.insert(line.item_id, merged.len());
                merged.push(*line);
            }
        }
    }

    for line in &merged {
        validate_quantity(line.quantity)?;
    }
    Ok(merged)
}

/// Sum of value × quantity, checked against the money column.
pub fn checkout_total(priced: &[(&Item, u32)]) -> Result<Decimal, ValidationError> {
    let mut total = Decimal::ZERO;
    for (item, quantity) in priced {
        let line = item
            .value
            .checked_mul(Decimal::from(*quantity))
            .ok_or(ValidationError::TotalOverflow)?;
        total = total.checked_add(line).ok_or(ValidationError::TotalOverflow)?;
    }
    validate_money("value", total)?;
    Ok(total)
}

/// Pairs each line with its loaded item.
fn price_lines<'a>(lines: &[CheckoutLine], items: &'a [Item]) -> Result<Vec<(&'a Item, u32)>, CheckoutError> {
    let by_id: HashMap<Uuid, &Item> = items.iter().map(|i| (i.id, i)).collect();
    lines
        .iter()
        .map(|line| {
            by_id
                .get(&line.item_id)
                .map(|item| (*item, line.quantity))
                .ok_or_else(|| CheckoutError::NotFound(format!("item {}", line.item_id)))
        })
        .collect()
}

#[derive(Clone)]
pub struct CheckoutService {
    pub pool: PgPool,
    pub items_repo: ItemsRepo,
    pub transactions_repo: TransactionsRepo,
    pub purchased_items_repo: PurchasedItemsRepo,
    pub transaction_errors_repo: TransactionErrorsRepo,
}

impl CheckoutService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            items_repo: ItemsRepo { pool: pool.clone() },
            transactions_repo: TransactionsRepo { pool: pool.clone() },
            purchased_items_repo: PurchasedItemsRepo { pool: pool.clone() },
            transaction_errors_repo: TransactionErrorsRepo { pool: pool.clone() },
            pool,
        }
    }

    /// Prices the cart and opens a transaction in `checkout` status.
    pub async fn begin_checkout(&self, req: BeginCheckout) -> Result<PaymentTransaction, CheckoutError> {
        let lines = merge_lines(&req.lines)?;
        let ids: Vec<Uuid> = lines.iter().map(|l| l.item_id).collect();
        let items = self.items_repo.find_many(&ids).await?;
        let value = checkout_total(&price_lines(&lines, &items)?)?;

        let new = NewPaymentTransaction {
            user_id: req.user_id,
            related: req.related,
            transaction_id: req.transaction_id,
            value,
            status: TransactionStatus::Checkout,
        };
        let transaction = self.transactions_repo.create(&new).await?;

        tracing::info!(
            payment_transaction_id = %transaction.id,
            transaction_id = %transaction.transaction_id,
            value = %transaction.value,
            lines = lines.len(),
            "checkout started"
        );
        Ok(transaction)
    }

    /// Records the provider's acceptance: status and purchased lines are
    /// written in one database transaction. The lines must price out to the
    /// value the transaction was opened with.
    pub async fn confirm_checkout(
        &self,
        payment_transaction_id: Uuid,
        outcome: TransactionStatus,
        lines: &[CheckoutLine],
    ) -> Result<ConfirmedCheckout, CheckoutError> {
        if !outcome.is_confirmation() {
            return Err(ValidationError::UnsupportedOutcome(outcome.to_string()).into());
        }
        let lines = merge_lines(lines)?;

        let mut tx = self.pool.begin().await?;
        let opened = TransactionsRepo::get_for_update_with(&mut *tx, payment_transaction_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(format!("transaction {payment_transaction_id}")))?;

        let ids: Vec<Uuid> = lines.iter().map(|l| l.item_id).collect();
        let items = ItemsRepo::find_many_with(&mut *tx, &ids).await?;
        let total = checkout_total(&price_lines(&lines, &items)?)?;
        if total != opened.value {
            return Err(ValidationError::TotalMismatch {
                expected: opened.value,
                actual: total,
            }
            .into());
        }

        let transaction = TransactionsRepo::update_status_with(&mut *tx, payment_transaction_id, outcome)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(format!("transaction {payment_transaction_id}")))?;

        let mut purchased = Vec::with_capacity(lines.len());
        for line in &lines {
            let new = NewPurchasedItem {
                user_id: transaction.user_id,
                payment_transaction_id: transaction.id,
                item_id: line.item_id,
                quantity: line.quantity,
            };
            if let Some(row) = PurchasedItemsRepo::insert_if_absent_with(&mut *tx, &new).await? {
                purchased.push(row);
            }
        }
        tx.commit().await?;

        tracing::info!(
            payment_transaction_id = %transaction.id,
            status = %transaction.status,
            new_lines = purchased.len(),
            "checkout confirmed"
        );
        Ok(ConfirmedCheckout { transaction, purchased })
    }

    pub async fn cancel_checkout(&self, payment_transaction_id: Uuid) -> Result<PaymentTransaction, CheckoutError> {
        let transaction = self
            .transactions_repo
            .update_status(payment_transaction_id, TransactionStatus::Canceled)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(format!("transaction {payment_transaction_id}")))?;

        tracing::info!(payment_transaction_id = %transaction.id, "checkout canceled");
        Ok(transaction)
    }

    pub async fn record_provider_error(
        &self,
        new: NewPaymentTransactionError,
    ) -> Result<PaymentTransactionError, CheckoutError> {
        let record = self.transaction_errors_repo.record(&new).await?;

        tracing::warn!(
            error_id = %record.id,
            user_id = %record.user_id,
            payment_transaction_id = ?record.payment_transaction_id,
            response_len = record.response.len(),
            "payment provider error recorded"
        );
        Ok(record)
    }
}
