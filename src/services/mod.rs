//! Business logic services

pub mod book_instances;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use crate::repository::{
    AuthorStore, BookInstanceStore, BookStore, GenreStore, HealthCheck, Repository,
};

/// Store handles the services are built from
#[derive(Clone)]
pub struct Stores {
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
    pub book_instances: Arc<dyn BookInstanceStore>,
    pub genres: Arc<dyn GenreStore>,
    pub health: Arc<dyn HealthCheck>,
}

impl From<Repository> for Stores {
    fn from(repository: Repository) -> Self {
        Self {
            authors: Arc::new(repository.authors.clone()),
            books: Arc::new(repository.books.clone()),
            book_instances: Arc::new(repository.book_instances.clone()),
            genres: Arc::new(repository.genres.clone()),
            health: Arc::new(repository),
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
    pub health: Arc<dyn HealthCheck>,
}

impl Services {
    /// Create all services over the given stores
    pub fn new(stores: Stores) -> Self {
        Self {
            catalog: catalog::CatalogService::new(
                stores.authors.clone(),
                stores.books.clone(),
                stores.book_instances.clone(),
                stores.genres.clone(),
            ),
            genres: genres::GenresService::new(stores.genres.clone(), stores.books.clone()),
            book_instances: book_instances::BookInstancesService::new(
                stores.book_instances.clone(),
                stores.books.clone(),
            ),
            health: stores.health,
        }
    }
}
