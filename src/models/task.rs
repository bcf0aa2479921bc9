use sqlx::SqlitePool;

/// A persisted task. Every query that touches a single task is scoped by owner,
/// so a task belonging to someone else behaves exactly like a missing one.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub user_id: i64,
}

impl Task {
    pub async fn create(pool: &SqlitePool, owner: i64, task_name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO task (task_name, user_id)
            VALUES (?, ?)
            RETURNING id, task_name, user_id
            "#,
        )
        .bind(task_name)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    /// All tasks of `owner`, oldest first.
    pub async fn list_for_owner(pool: &SqlitePool, owner: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, task_name, user_id FROM task WHERE user_id = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(pool)
        .await
    }

    pub async fn find_owned(pool: &SqlitePool, id: i64, owner: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, task_name, user_id FROM task WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await
    }

    /// Overwrites the text. Returns false when no task of `owner` has this id.
    pub async fn rename(pool: &SqlitePool, id: i64, owner: i64, task_name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE task SET task_name = ? WHERE id = ? AND user_id = ?")
            .bind(task_name)
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns false when no task of `owner` has this id.
    pub async fn delete(pool: &SqlitePool, id: i64, owner: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
