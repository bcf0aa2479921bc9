use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A registered account. Tasks reference it by `id`; there is no back-reference.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,  // PHC string, never plaintext
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Inserts a user. A duplicate email surfaces as a unique-violation `sqlx::Error::Database`.
    pub async fn create(pool: &SqlitePool, data: NewUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO user (name, email, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, name, email, password_hash
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email, password_hash FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email, password_hash FROM user WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}

/// True when `err` is the storage layer rejecting a duplicate key.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
