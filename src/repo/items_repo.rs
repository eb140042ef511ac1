use crate::domain::item::{Item, NewItem};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct ItemsRepo {
    pub pool: PgPool,
}

fn item_from_row(r: &PgRow) -> Item {
    Item {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        value: r.get("value"),
    }
}

impl ItemsRepo {
    pub async fn create(&self, new: &NewItem) -> Result<Item> {
        new.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO items (id, name, description, value)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, value
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(item_from_row(&row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Item>> {
        let row = sqlx::query("SELECT id, name, description, value FROM items WHERE id=$1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(item_from_row))
    }

    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Item>> {
        Self::find_many_with(&self.pool, ids).await
    }

    pub async fn find_many_with<'e, E: PgExecutor<'e>>(executor: E, ids: &[Uuid]) -> Result<Vec<Item>> {
        let rows = sqlx::query("SELECT id, name, description, value FROM items WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .fetch_all(executor)
            .await?;

        Ok(rows.iter().map(item_from_row).collect())
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query("SELECT id, name, description, value FROM items ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(item_from_row).collect())
    }

    pub async fn update(&self, id: Uuid, changes: &NewItem) -> Result<Option<Item>> {
        changes.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE items SET name=$2, description=$3, value=$4
            WHERE id=$1
            RETURNING id, name, description, value
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(item_from_row))
    }

    /// Fails with a foreign-key violation while purchases still point at the item.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM items WHERE id=$1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
