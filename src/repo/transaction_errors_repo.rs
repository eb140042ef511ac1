use crate::domain::transaction_error::{NewPaymentTransactionError, PaymentTransactionError};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const COLUMNS: &str = "id, date, user_id, response, payment_transaction_id";

#[derive(Clone)]
pub struct TransactionErrorsRepo {
    pub pool: PgPool,
}

fn error_from_row(r: &PgRow) -> PaymentTransactionError {
    PaymentTransactionError {
        id: r.get("id"),
        date: r.get("date"),
        user_id: r.get("user_id"),
        response: r.get("response"),
        payment_transaction_id: r.get("payment_transaction_id"),
    }
}

impl TransactionErrorsRepo {
    pub async fn record(&self, new: &NewPaymentTransactionError) -> Result<PaymentTransactionError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payment_transaction_errors (id, date, user_id, response, payment_transaction_id)
            VALUES ($1, now(), $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.response)
        .bind(new.payment_transaction_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(error_from_row(&row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PaymentTransactionError>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM payment_transaction_errors WHERE id=$1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(error_from_row))
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<PaymentTransactionError>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transaction_errors ORDER BY date DESC, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(error_from_row).collect())
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<PaymentTransactionError>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transaction_errors WHERE user_id=$1 ORDER BY date DESC, id LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(error_from_row).collect())
    }

    pub async fn list_for_transaction(&self, payment_transaction_id: Uuid) -> Result<Vec<PaymentTransactionError>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_transaction_errors WHERE payment_transaction_id=$1 ORDER BY date DESC, id"
        ))
        .bind(payment_transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(error_from_row).collect())
    }

    /// Corrects the stored response text. `date` is never part of an update.
    pub async fn update_response(&self, id: Uuid, response: &str) -> Result<Option<PaymentTransactionError>> {
        let row = sqlx::query(&format!(
            "UPDATE payment_transaction_errors SET response=$2 WHERE id=$1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(response)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(error_from_row))
    }
}
