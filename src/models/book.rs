//! Book projections used by copy and genre pages

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{Canonical, CATALOG_ROOT};

pub fn book_url(id: i32) -> String {
    format!("{}/book/{}", CATALOG_ROOT, id)
}

/// Book choice for select lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookTitle {
    pub id: i32,
    pub title: String,
}

impl Canonical for BookTitle {
    fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book as listed on a genre page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
}

impl Canonical for BookSummary {
    fn url(&self) -> String {
        book_url(self.id)
    }
}
