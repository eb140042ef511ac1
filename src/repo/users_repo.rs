use crate::domain::user::User;
use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct UsersRepo {
    pub pool: PgPool,
}

impl UsersRepo {
    pub async fn create(&self, email: &str) -> Result<User> {
        let row = sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2) RETURNING id, email")
            .bind(Uuid::new_v4())
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(User {
            id: row.get("id"),
            email: row.get("email"),
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, email FROM users WHERE id=$1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            email: r.get("email"),
        }))
    }
}
