//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

pub use authors::AuthorStore;
pub use book_instances::BookInstanceStore;
pub use books::BookStore;
pub use genres::GenreStore;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Postgres SQLSTATE for unique_violation
pub(crate) const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Whether `error` is a database error carrying the given SQLSTATE
pub(crate) fn violates(error: &sqlx::Error, sqlstate: &str) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(sqlstate),
        _ => false,
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub genres: genres::GenresRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Round-trip to the database, used by the readiness probe
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait::async_trait]
impl HealthCheck for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
