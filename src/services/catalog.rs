//! Catalog overview service

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore},
};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
    book_instances: Arc<dyn BookInstanceStore>,
    genres: Arc<dyn GenreStore>,
}

impl CatalogService {
    pub fn new(
        authors: Arc<dyn AuthorStore>,
        books: Arc<dyn BookStore>,
        book_instances: Arc<dyn BookInstanceStore>,
        genres: Arc<dyn GenreStore>,
    ) -> Self {
        Self {
            authors,
            books,
            book_instances,
            genres,
        }
    }

    /// Count every record type concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        ) = tokio::try_join!(
            self.books.count(),
            self.book_instances.count(),
            self.book_instances
                .count_with_status(BookInstanceStatus::Available),
            self.authors.count(),
            self.genres.count(),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }
}
