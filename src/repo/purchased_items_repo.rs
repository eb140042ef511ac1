use crate::domain::item::Item;
use crate::domain::purchased_item::{
    NewPurchasedItem, PurchaseTotal, PurchasedItem, PurchasedItemDetail, DEFAULT_ORDER_BY,
};
use crate::domain::validation::validate_quantity;
use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, payment_transaction_id, item_id, quantity";

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.payment_transaction_id, p.item_id, p.quantity,
           i.name AS item_name, i.description AS item_description, i.value AS item_value,
           u.email AS user_email,
           t.transaction_id, t.date AS transaction_date
    FROM purchased_items p
    JOIN items i ON i.id = p.item_id
    JOIN users u ON u.id = p.user_id
    JOIN payment_transactions t ON t.id = p.payment_transaction_id
"#;

#[derive(Clone)]
pub struct PurchasedItemsRepo {
    pub pool: PgPool,
}

fn purchased_item_from_row(r: &PgRow) -> Result<PurchasedItem> {
    let quantity: i32 = r.try_get("quantity")?;

    Ok(PurchasedItem {
        id: r.try_get("id")?,
        user_id: r.try_get("user_id")?,
        payment_transaction_id: r.try_get("payment_transaction_id")?,
        item_id: r.try_get("item_id")?,
        quantity: u32::try_from(quantity).context("stored quantity is negative")?,
    })
}

fn detail_from_row(r: &PgRow) -> Result<PurchasedItemDetail> {
    let purchase = purchased_item_from_row(r)?;
    let item = Item {
        id: purchase.item_id,
        name: r.try_get("item_name")?,
        description: r.try_get("item_description")?,
        value: r.try_get("item_value")?,
    };

    Ok(PurchasedItemDetail {
        purchase,
        item,
        user_email: r.try_get("user_email")?,
        transaction_id: r.try_get("transaction_id")?,
        transaction_date: r.try_get("transaction_date")?,
    })
}

fn details_from_rows(rows: &[PgRow]) -> Result<Vec<PurchasedItemDetail>> {
    rows.iter().map(detail_from_row).collect()
}

impl PurchasedItemsRepo {
    /// Plain insert: a missing user, transaction or item surfaces as a
    /// foreign-key violation, a second line for the same item as a unique one.
    pub async fn create(&self, new: &NewPurchasedItem) -> Result<PurchasedItem> {
        let quantity = validate_quantity(new.quantity)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO purchased_items (id, user_id, payment_transaction_id, item_id, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.payment_transaction_id)
        .bind(new.item_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;

        purchased_item_from_row(&row)
    }

    pub async fn create_many(&self, lines: &[NewPurchasedItem]) -> Result<Vec<PurchasedItem>> {
        let mut tx = self.pool.begin().await?;
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let quantity = validate_quantity(line.quantity)?;
            let row = sqlx::query(&format!(
                r#"
                INSERT INTO purchased_items (id, user_id, payment_transaction_id, item_id, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(line.user_id)
            .bind(line.payment_transaction_id)
            .bind(line.item_id)
            .bind(quantity)
            .fetch_one(&mut *tx)
            .await?;
            out.push(purchased_item_from_row(&row)?);
        }
        tx.commit().await?;

        Ok(out)
    }

    /// Returns `None` when the transaction already has a line for the item.
    pub async fn insert_if_absent_with<'e, E: PgExecutor<'e>>(
        executor: E,
        new: &NewPurchasedItem,
    ) -> Result<Option<PurchasedItem>> {
        let quantity = validate_quantity(new.quantity)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO purchased_items (id, user_id, payment_transaction_id, item_id, quantity)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (payment_transaction_id, item_id) DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.payment_transaction_id)
        .bind(new.item_id)
        .bind(quantity)
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(purchased_item_from_row).transpose()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PurchasedItem>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM purchased_items WHERE id=$1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(purchased_item_from_row).transpose()
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<PurchasedItemDetail>> {
        let rows = sqlx::query(&format!("{DETAIL_SELECT} ORDER BY {DEFAULT_ORDER_BY}, p.id LIMIT $1"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        details_from_rows(&rows)
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<PurchasedItemDetail>> {
        let rows = sqlx::query(&format!(
            "{DETAIL_SELECT} WHERE p.user_id=$1 ORDER BY {DEFAULT_ORDER_BY}, p.id LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        details_from_rows(&rows)
    }

    pub async fn list_for_transaction(&self, payment_transaction_id: Uuid) -> Result<Vec<PurchasedItemDetail>> {
        let rows = sqlx::query(&format!(
            "{DETAIL_SELECT} WHERE p.payment_transaction_id=$1 ORDER BY {DEFAULT_ORDER_BY}, p.id"
        ))
        .bind(payment_transaction_id)
        .fetch_all(&self.pool)
        .await?;

        details_from_rows(&rows)
    }

    pub async fn has_purchased(&self, user_id: Uuid, item_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM purchased_items WHERE user_id=$1 AND item_id=$2) AS found",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("found"))
    }

    pub async fn totals_for_user(&self, user_id: Uuid) -> Result<Vec<PurchaseTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT p.item_id, i.name AS item_name, SUM(p.quantity)::BIGINT AS quantity
            FROM purchased_items p
            JOIN items i ON i.id = p.item_id
            WHERE p.user_id=$1
            GROUP BY p.item_id, i.name
            ORDER BY i.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PurchaseTotal {
                item_id: r.get("item_id"),
                item_name: r.get("item_name"),
                quantity: r.get("quantity"),
            })
            .collect())
    }
}
