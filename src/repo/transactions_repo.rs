use crate::domain::related::RelatedObject;
use crate::domain::status::TransactionStatus;
use crate::domain::transaction::{NewPaymentTransaction, PaymentTransaction, DEFAULT_ORDER_BY};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, related_type, related_id, date, transaction_id, value, status";

#[derive(Clone)]
pub struct TransactionsRepo {
    pub pool: PgPool,
}

fn transaction_from_row(r: &PgRow) -> Result<PaymentTransaction> {
    let status: String = r.try_get("status")?;
    let related = RelatedObject::from_columns(r.try_get("related_type")?, r.try_get("related_id")?)?;

    Ok(PaymentTransaction {
        id: r.try_get("id")?,
        user_id: r.try_get("user_id")?,
        related,
        date: r.try_get("date")?,
        transaction_id: r.try_get("transaction_id")?,
        value: r.try_get("value")?,
        status: status.parse()?,
    })
}

fn transactions_from_rows(rows: &[PgRow]) -> Result<Vec<PaymentTransaction>> {
    rows.iter().map(transaction_from_row).collect()
}

impl TransactionsRepo {
    pub async fn create(&self, new: &NewPaymentTransaction) -> Result<PaymentTransaction> {
        Self::insert_with(&self.pool, new).await
    }

    /// Insert through any executor, so the checkout service can run it
    /// inside its own database transaction.
    pub async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        new: &NewPaymentTransaction,
    ) -> Result<PaymentTransaction> {
        new.validate()?;
        let (related_type, related_id) = RelatedObject::to_columns(new.related.as_ref());

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payment_transactions (id, user_id, related_type, related_id, date, transaction_id, value, status)
            VALUES ($1, $2, $3, $4, now(), $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(related_type)
        .bind(related_id)
        .bind(&new.transaction_id)
        .bind(new.value)
        .bind(new.status.as_str())
        .fetch_one(executor)
        .await?;

        transaction_from_row(&row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PaymentTransaction>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM payment_transactions WHERE id=$1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    /// Locks the row until the surrounding database transaction ends.
    pub async fn get_for_update_with<'e, E: PgExecutor<'e>>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<PaymentTransaction>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM payment_transactions WHERE id=$1 FOR UPDATE"))
            .bind(id)
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    /// Provider ids are not unique; the first row in default order wins.
    pub async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<PaymentTransaction>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transactions WHERE transaction_id=$1 ORDER BY {DEFAULT_ORDER_BY} LIMIT 1"
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<PaymentTransaction>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transactions ORDER BY {DEFAULT_ORDER_BY} LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        transactions_from_rows(&rows)
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<PaymentTransaction>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transactions WHERE user_id=$1 ORDER BY {DEFAULT_ORDER_BY} LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        transactions_from_rows(&rows)
    }

    pub async fn list_for_related(&self, related: &RelatedObject) -> Result<Vec<PaymentTransaction>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transactions WHERE related_type=$1 AND related_id=$2 ORDER BY {DEFAULT_ORDER_BY}"
        ))
        .bind(related.content_type())
        .bind(related.object_id())
        .fetch_all(&self.pool)
        .await?;

        transactions_from_rows(&rows)
    }

    pub async fn update_status(&self, id: Uuid, status: TransactionStatus) -> Result<Option<PaymentTransaction>> {
        Self::update_status_with(&self.pool, id, status).await
    }

    /// Sets the status and refreshes `date`. Any status may follow any other.
    pub async fn update_status_with<'e, E: PgExecutor<'e>>(
        executor: E,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<PaymentTransaction>> {
        let row = sqlx::query(&format!(
            "UPDATE payment_transactions SET status=$2, date=now() WHERE id=$1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    /// Writes every mutable field back; `date` is always refreshed. The
    /// owner is fixed at creation.
    pub async fn save(&self, tx: &PaymentTransaction) -> Result<Option<PaymentTransaction>> {
        tx.validate()?;
        let (related_type, related_id) = RelatedObject::to_columns(tx.related.as_ref());

        let row = sqlx::query(&format!(
            r#"
            UPDATE payment_transactions
            SET related_type=$2, related_id=$3, transaction_id=$4, value=$5, status=$6, date=now()
            WHERE id=$1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(tx.id)
        .bind(related_type)
        .bind(related_id)
        .bind(&tx.transaction_id)
        .bind(tx.value)
        .bind(tx.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }
}
