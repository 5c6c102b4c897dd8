//! Books repository (read side only)

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{BookSummary, BookTitle},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Id and title of every book, for select lists
    async fn list_titles(&self) -> AppResult<Vec<BookTitle>>;

    /// Books linked to a genre
    async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookSummary>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.id, b.title, b.summary
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
