//! BookInstance (physical copy of a book) model and related types

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    form::{field_errors, has_error, trim_in_place, FieldError, Rejected},
    Canonical, CATALOG_ROOT,
};

/// Copy availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(BookInstanceStatus::Available),
            "maintenance" => Ok(BookInstanceStatus::Maintenance),
            "loaned" => Ok(BookInstanceStatus::Loaned),
            "reserved" => Ok(BookInstanceStatus::Reserved),
            _ => Err(format!("Invalid book instance status: {}", s)),
        }
    }
}

// Stored as VARCHAR
impl sqlx::Type<Postgres> for BookInstanceStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookInstanceStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

pub fn book_instance_url(id: i32) -> String {
    format!("{}/bookinstance/{}", CATALOG_ROOT, id)
}

/// Book instance row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn list_url() -> String {
        format!("{}/bookinstances", CATALOG_ROOT)
    }
}

impl Canonical for BookInstance {
    fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

/// Book instance joined with its book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstanceDetail {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDetail {
    pub fn book_url(&self) -> String {
        super::book::book_url(self.book_id)
    }
}

impl Canonical for BookInstanceDetail {
    fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

/// Validated copy data, used for inserts and full overwrites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookInstance {
    pub book_id: i32,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Copy create/update form as submitted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInstanceForm {
    /// Book id
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    /// Empty means the default status
    #[serde(default)]
    pub status: String,
    /// ISO-8601 date, empty when unknown
    #[serde(default)]
    pub due_back: String,
}

impl BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    /// Trim and validate the submission
    pub fn validated(mut self) -> Result<NewBookInstance, Rejected<BookInstanceForm>> {
        trim_in_place(&mut self.book);
        trim_in_place(&mut self.imprint);
        trim_in_place(&mut self.status);
        trim_in_place(&mut self.due_back);

        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e, Self::FIELDS),
        };

        let book_id = if has_error(&errors, "book") {
            None
        } else {
            match self.book.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push(FieldError::new("book", "Book must be specified"));
                    None
                }
            }
        };

        let status = if self.status.is_empty() {
            Some(BookInstanceStatus::default())
        } else {
            match self.status.parse() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(FieldError::new("status", "Invalid status"));
                    None
                }
            }
        };

        let due_back = if self.due_back.is_empty() {
            None
        } else {
            match parse_iso_date(&self.due_back) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::new("due_back", "Invalid date"));
                    None
                }
            }
        };

        match (book_id, status) {
            (Some(book_id), Some(status)) if errors.is_empty() => Ok(NewBookInstance {
                book_id,
                imprint: self.imprint,
                status,
                due_back,
            }),
            _ => {
                errors.sort_by_key(|e| {
                    Self::FIELDS
                        .iter()
                        .position(|f| *f == e.field)
                        .unwrap_or(Self::FIELDS.len())
                });
                Err(Rejected::new(self, errors))
            }
        }
    }

    /// Book id as submitted, if it parses
    pub fn selected_book(&self) -> Option<i32> {
        self.book.trim().parse().ok()
    }
}

impl From<&BookInstanceDetail> for BookInstanceForm {
    fn from(instance: &BookInstanceDetail) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Delete confirmation form, the target id travels in `bookinstance`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteBookInstanceForm {
    pub bookinstance: i32,
}

/// Accepts a plain date or a full RFC 3339 timestamp
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(book: &str, imprint: &str, status: &str, due_back: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: book.to_string(),
            imprint: imprint.to_string(),
            status: status.to_string(),
            due_back: due_back.to_string(),
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "Loaned".parse::<BookInstanceStatus>(),
            Ok(BookInstanceStatus::Loaned)
        );
        assert_eq!(
            "available".parse::<BookInstanceStatus>(),
            Ok(BookInstanceStatus::Available)
        );
        assert!("Lost".parse::<BookInstanceStatus>().is_err());
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_valid_form() {
        let data = form(" 3 ", " London Gollancz, 2014. ", "Available", "2024-05-01")
            .validated()
            .unwrap();
        assert_eq!(
            data,
            NewBookInstance {
                book_id: 3,
                imprint: "London Gollancz, 2014.".to_string(),
                status: BookInstanceStatus::Available,
                due_back: NaiveDate::from_ymd_opt(2024, 5, 1),
            }
        );
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let data = form("3", "Gollancz", "", "").validated().unwrap();
        assert_eq!(data.status, BookInstanceStatus::Maintenance);
        assert_eq!(data.due_back, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let rejected = form("", "  ", "", "").validated().unwrap_err();
        let fields: Vec<&str> = rejected.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["book", "imprint"]);
        assert_eq!(rejected.errors[0].message, "Book must be specified");
        assert_eq!(rejected.errors[1].message, "Imprint must be specified");
    }

    #[test]
    fn test_invalid_values() {
        let rejected = form("abc", "Gollancz", "Lost", "05/01/2024")
            .validated()
            .unwrap_err();
        let fields: Vec<&str> = rejected.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["book", "status", "due_back"]);
        assert_eq!(rejected.form.status, "Lost");
    }

    #[test]
    fn test_rfc3339_due_back() {
        assert_eq!(
            parse_iso_date("2024-05-01T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn test_form_from_detail() {
        let detail = BookInstanceDetail {
            id: 9,
            book_id: 2,
            book_title: "The Wise Man's Fear".to_string(),
            imprint: "Gollancz, 2011.".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let form = BookInstanceForm::from(&detail);
        assert_eq!(form.book, "2");
        assert_eq!(form.status, "Loaned");
        assert_eq!(form.due_back, "2024-01-31");
        assert_eq!(form.selected_book(), Some(2));
        assert_eq!(detail.url(), "/catalog/bookinstance/9");
        assert_eq!(detail.book_url(), "/catalog/book/2");
    }
}
