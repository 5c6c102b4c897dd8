//! Genre management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        form::FieldError,
        genre::{GenreForm, NewGenre},
        BookSummary, Genre, Rejected,
    },
    repository::{BookStore, GenreStore},
};

/// A genre together with the books filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreWithBooks {
    pub genre: Genre,
    pub books: Vec<BookSummary>,
}

#[derive(Debug)]
pub enum GenreCreation {
    Created(Genre),
    /// A genre with the same name already exists
    Existing(Genre),
    Rejected(Rejected<GenreForm>),
}

#[derive(Debug)]
pub enum GenreUpdate {
    Updated(Genre),
    Rejected(Rejected<GenreForm>),
}

#[derive(Debug)]
pub enum GenreDeletion {
    Deleted,
    /// Books still reference the genre, nothing was removed
    InUse(GenreWithBooks),
}

#[derive(Clone)]
pub struct GenresService {
    genres: Arc<dyn GenreStore>,
    books: Arc<dyn BookStore>,
}

impl GenresService {
    pub fn new(genres: Arc<dyn GenreStore>, books: Arc<dyn BookStore>) -> Self {
        Self { genres, books }
    }

    /// All genres sorted by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Genre> {
        self.genres.get(id).await
    }

    /// Genre and its books, fetched concurrently
    pub async fn detail(&self, id: i32) -> AppResult<GenreWithBooks> {
        let (genre, books) = tokio::try_join!(self.genres.get(id), self.books.list_by_genre(id))?;
        Ok(GenreWithBooks { genre, books })
    }

    /// Create a genre unless one with the same name exists
    pub async fn create(&self, form: GenreForm) -> AppResult<GenreCreation> {
        let NewGenre { name } = match form.validated() {
            Ok(data) => data,
            Err(rejected) => return Ok(GenreCreation::Rejected(rejected)),
        };

        if let Some(existing) = self.genres.find_by_name(&name).await? {
            tracing::debug!("Genre '{}' already exists as id={}", name, existing.id);
            return Ok(GenreCreation::Existing(existing));
        }

        if let Some(genre) = self.genres.insert_unique(&name).await? {
            tracing::info!("Created genre id={} name='{}'", genre.id, genre.name);
            return Ok(GenreCreation::Created(genre));
        }

        // Lost an insert race: the winner's row is committed by now
        match self.genres.find_by_name(&name).await? {
            Some(existing) => Ok(GenreCreation::Existing(existing)),
            None => Err(AppError::Internal(format!(
                "Genre '{}' conflicted on insert but cannot be found",
                name
            ))),
        }
    }

    /// Overwrite a genre's name
    pub async fn update(&self, id: i32, form: GenreForm) -> AppResult<GenreUpdate> {
        self.genres.get(id).await?;

        let NewGenre { name } = match form.validated() {
            Ok(data) => data,
            Err(rejected) => return Ok(GenreUpdate::Rejected(rejected)),
        };

        match self.genres.update(id, &name).await {
            Ok(genre) => {
                tracing::info!("Updated genre id={} name='{}'", genre.id, genre.name);
                Ok(GenreUpdate::Updated(genre))
            }
            Err(AppError::Conflict(_)) => Ok(GenreUpdate::Rejected(Rejected::new(
                GenreForm { name },
                vec![FieldError::new("name", "A genre with this name already exists")],
            ))),
            Err(e) => Err(e),
        }
    }

    /// Delete a genre that no book references
    pub async fn delete(&self, id: i32) -> AppResult<GenreDeletion> {
        let current = self.detail(id).await?;
        if !current.books.is_empty() {
            return Ok(GenreDeletion::InUse(current));
        }

        if self.genres.delete_if_unused(id).await? {
            tracing::info!("Deleted genre id={}", id);
            return Ok(GenreDeletion::Deleted);
        }

        // A book was linked (or the genre removed) since the check
        let current = self.detail(id).await?;
        tracing::warn!("Genre id={} gained {} book(s) during delete", id, current.books.len());
        Ok(GenreDeletion::InUse(current))
    }
}
