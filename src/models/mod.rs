//! Data models for the catalog

pub mod book;
pub mod book_instance;
pub mod form;
pub mod genre;

use serde::Serialize;

// Re-export commonly used types
pub use book::{BookSummary, BookTitle};
pub use book_instance::{BookInstance, BookInstanceDetail, BookInstanceStatus};
pub use form::{FieldError, Rejected};
pub use genre::Genre;

/// Prefix shared by every catalog route
pub const CATALOG_ROOT: &str = "/catalog";

/// Records addressable through a stable, id-derived path
pub trait Canonical {
    fn url(&self) -> String;
}

/// A record serialized together with its canonical path
#[derive(Debug, Serialize)]
pub struct Linked<'a, T: Serialize> {
    #[serde(flatten)]
    pub record: &'a T,
    pub url: String,
}

impl<'a, T: Serialize + Canonical> From<&'a T> for Linked<'a, T> {
    fn from(record: &'a T) -> Self {
        Self {
            url: record.url(),
            record,
        }
    }
}

pub fn linked<T: Serialize + Canonical>(records: &[T]) -> Vec<Linked<'_, T>> {
    records.iter().map(Linked::from).collect()
}
