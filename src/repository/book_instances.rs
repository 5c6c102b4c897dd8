//! Book instances repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::NewBookInstance, BookInstance, BookInstanceDetail, BookInstanceStatus,
    },
    repository::{violates, FOREIGN_KEY_VIOLATION},
};

/// A book removed between the existence check and the write trips the FK
fn book_violation(e: sqlx::Error, book_id: i32) -> AppError {
    if violates(&e, FOREIGN_KEY_VIOLATION) {
        AppError::Conflict(format!("Book {} not found", book_id))
    } else {
        AppError::Database(e)
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint, bi.status, bi.due_back
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// All copies joined with their book
    async fn list(&self) -> AppResult<Vec<BookInstanceDetail>>;

    async fn get(&self, id: i32) -> AppResult<BookInstanceDetail>;

    /// `Conflict` when the referenced book no longer exists
    async fn create(&self, data: &NewBookInstance) -> AppResult<BookInstance>;

    /// Overwrite every field of an existing copy; `Conflict` as for `create`
    async fn update(&self, id: i32, data: &NewBookInstance) -> AppResult<BookInstance>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn count(&self) -> AppResult<i64>;

    async fn count_with_status(&self, status: BookInstanceStatus) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInstanceStore for BookInstancesRepository {
    async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let query = format!("{} ORDER BY b.title, bi.id", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, BookInstanceDetail>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<BookInstanceDetail> {
        let query = format!("{} WHERE bi.id = $1", DETAIL_SELECT);
        sqlx::query_as::<_, BookInstanceDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    async fn create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| book_violation(e, data.book_id))?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &NewBookInstance) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| book_violation(e, data.book_id))?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book copy {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_with_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
