// SQLite QueueRepository Implementation

use async_trait::async_trait;
use mykilio_core::domain::{Queue, QueueChanges};
use mykilio_core::error::{AppError, Result};
use mykilio_core::port::QueueRepository;
use sqlx::SqlitePool;
use tracing::debug;

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE / PRIMARY KEY constraint failed
                        AppError::Conflict(format!(
                            "Queue already exists: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "5" => {
                        // SQLITE_BUSY - database is locked
                        AppError::Database(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteQueueRepository {
    pool: SqlitePool,
}

impl SqliteQueueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqliteQueueRepository {
    async fn list(&self) -> Result<Vec<Queue>> {
        let rows = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(QueueRow::into_queue).collect())
    }

    async fn insert(&self, queue: &Queue) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO queues (id, name, owner, title, description, number)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&queue.id)
        .bind(&queue.name)
        .bind(&queue.owner)
        .bind(&queue.title)
        .bind(&queue.description)
        .bind(queue.number)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Queue>> {
        let row = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(QueueRow::into_queue))
    }

    async fn update_by_name(&self, name: &str, changes: &QueueChanges) -> Result<Option<Queue>> {
        // RETURNING reports the matched row, so a missing queue shows up as
        // no row instead of needing a second SELECT
        let row = sqlx::query_as::<_, QueueRow>(
            r#"
            UPDATE queues
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                number = COALESCE(?, number)
            WHERE name = ?
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.number)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(QueueRow::into_queue))
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM queues WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(queue_name = %name, rows_affected = result.rows_affected(), "Delete executed");

        Ok(result.rows_affected())
    }
}

// Internal row mapping
#[derive(sqlx::FromRow)]
struct QueueRow {
    id: String,
    name: String,
    owner: String,
    title: String,
    description: String,
    number: i64,
}

impl QueueRow {
    fn into_queue(self) -> Queue {
        Queue {
            id: self.id,
            name: self.name,
            owner: self.owner,
            title: self.title,
            description: self.description,
            number: self.number,
        }
    }
}
