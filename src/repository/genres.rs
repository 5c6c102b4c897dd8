//! Genres repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Genre,
    repository::{violates, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres, ascending by name
    async fn list(&self) -> AppResult<Vec<Genre>>;

    async fn get(&self, id: i32) -> AppResult<Genre>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    /// Insert a genre unless the name is already taken; `None` on conflict
    async fn insert_unique(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn update(&self, id: i32, name: &str) -> AppResult<Genre>;

    /// Delete the genre only if no book references it.
    /// Returns false when nothing was deleted.
    async fn delete_if_unused(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreStore for GenresRepository {
    async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_unique(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, name: &str) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if violates(&e, UNIQUE_VIOLATION) {
                    AppError::Conflict(format!("Genre '{}' already exists", name))
                } else {
                    AppError::Database(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn delete_if_unused(&self, id: i32) -> AppResult<bool> {
        // Single statement; a link committed while it runs trips the
        // restricting FK on book_genres instead
        let result = sqlx::query(
            r#"
            DELETE FROM genres
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM book_genres WHERE genre_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if violates(&e, FOREIGN_KEY_VIOLATION) => {
                tracing::debug!("Genre id={} still referenced at delete time", id);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
