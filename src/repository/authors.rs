//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
