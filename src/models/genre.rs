//! Genre model and its submission form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    form::{field_errors, trim_in_place, Rejected},
    Canonical, CATALOG_ROOT,
};

/// Genre record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    /// Unique name, 3 to 100 characters
    pub name: String,
}

impl Genre {
    pub fn url_for(id: i32) -> String {
        format!("{}/genre/{}", CATALOG_ROOT, id)
    }

    pub fn list_url() -> String {
        format!("{}/genres", CATALOG_ROOT)
    }
}

impl Canonical for Genre {
    fn url(&self) -> String {
        Genre::url_for(self.id)
    }
}

/// Validated genre data ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

/// Genre create/update form as submitted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "Genre name required (3 to 100 characters)"))]
    pub name: String,
}

impl GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    /// Trim and validate the submission
    pub fn validated(mut self) -> Result<NewGenre, Rejected<GenreForm>> {
        trim_in_place(&mut self.name);
        match self.validate() {
            Ok(()) => Ok(NewGenre { name: self.name }),
            Err(errors) => {
                let errors = field_errors(&errors, Self::FIELDS);
                Err(Rejected::new(self, errors))
            }
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

/// Delete confirmation form, the target id travels in `genreid`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteGenreForm {
    pub genreid: i32,
}
