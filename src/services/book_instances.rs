//! Book copy management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstanceForm, NewBookInstance},
        form::FieldError,
        BookInstance, BookInstanceDetail, BookTitle, Rejected,
    },
    repository::{BookInstanceStore, BookStore},
};

/// Outcome of a create or update submission
#[derive(Debug)]
pub enum BookInstanceSubmission {
    Saved(BookInstance),
    /// The form goes back to the user together with the book choices
    Rejected {
        rejected: Rejected<BookInstanceForm>,
        books: Vec<BookTitle>,
    },
}

/// A copy loaded for editing, with the book choices for the form
#[derive(Debug, Clone)]
pub struct BookInstanceEdit {
    pub instance: BookInstanceDetail,
    pub books: Vec<BookTitle>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    book_instances: Arc<dyn BookInstanceStore>,
    books: Arc<dyn BookStore>,
}

impl BookInstancesService {
    pub fn new(book_instances: Arc<dyn BookInstanceStore>, books: Arc<dyn BookStore>) -> Self {
        Self {
            book_instances,
            books,
        }
    }

    /// All copies with their book titles
    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.book_instances.list().await
    }

    pub async fn detail(&self, id: i32) -> AppResult<BookInstanceDetail> {
        self.book_instances.get(id).await
    }

    /// Book choices for the copy form
    pub async fn book_choices(&self) -> AppResult<Vec<BookTitle>> {
        self.books.list_titles().await
    }

    /// Copy and book choices, fetched concurrently
    pub async fn edit(&self, id: i32) -> AppResult<BookInstanceEdit> {
        let (instance, books) =
            tokio::try_join!(self.book_instances.get(id), self.books.list_titles())?;
        Ok(BookInstanceEdit { instance, books })
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<BookInstanceSubmission> {
        let data = match self.check(form.clone()).await? {
            Ok(data) => data,
            Err(rejected) => return self.reject(rejected).await,
        };

        match self.book_instances.create(&data).await {
            Ok(instance) => {
                tracing::info!(
                    "Created book copy id={} for book id={}",
                    instance.id,
                    instance.book_id
                );
                Ok(BookInstanceSubmission::Saved(instance))
            }
            Err(AppError::Conflict(_)) => self.reject(book_not_found(form)).await,
            Err(e) => Err(e),
        }
    }

    /// Overwrite every field of an existing copy
    pub async fn update(&self, id: i32, form: BookInstanceForm) -> AppResult<BookInstanceSubmission> {
        self.book_instances.get(id).await?;

        let data = match self.check(form.clone()).await? {
            Ok(data) => data,
            Err(rejected) => return self.reject(rejected).await,
        };

        match self.book_instances.update(id, &data).await {
            Ok(instance) => {
                tracing::info!("Updated book copy id={}", instance.id);
                Ok(BookInstanceSubmission::Saved(instance))
            }
            Err(AppError::Conflict(_)) => self.reject(book_not_found(form)).await,
            Err(e) => Err(e),
        }
    }

    /// Remove a copy; a missing id is reported as not found
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.book_instances.delete(id).await?;
        tracing::info!("Deleted book copy id={}", id);
        Ok(())
    }

    /// Validate the form and make sure the referenced book exists
    async fn check(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Result<NewBookInstance, Rejected<BookInstanceForm>>> {
        let data = match form.clone().validated() {
            Ok(data) => data,
            Err(rejected) => return Ok(Err(rejected)),
        };

        if !self.books.exists(data.book_id).await? {
            return Ok(Err(book_not_found(form)));
        }
        Ok(Ok(data))
    }

    async fn reject(
        &self,
        rejected: Rejected<BookInstanceForm>,
    ) -> AppResult<BookInstanceSubmission> {
        let books = self.books.list_titles().await?;
        Ok(BookInstanceSubmission::Rejected { rejected, books })
    }
}

fn book_not_found(form: BookInstanceForm) -> Rejected<BookInstanceForm> {
    Rejected::new(form, vec![FieldError::new("book", "Book not found")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::BookInstanceStatus,
        repository::{book_instances::MockBookInstanceStore, books::MockBookStore},
    };
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn titles() -> Vec<BookTitle> {
        vec![BookTitle {
            id: 3,
            title: "The Wise Man's Fear".to_string(),
        }]
    }

    fn detail(id: i32) -> BookInstanceDetail {
        BookInstanceDetail {
            id,
            book_id: 3,
            book_title: "The Wise Man's Fear".to_string(),
            imprint: "Gollancz, 2011.".to_string(),
            status: BookInstanceStatus::Maintenance,
            due_back: None,
        }
    }

    fn service(copies: MockBookInstanceStore, books: MockBookStore) -> BookInstancesService {
        BookInstancesService::new(Arc::new(copies), Arc::new(books))
    }

    fn valid_form() -> BookInstanceForm {
        BookInstanceForm {
            book: "3".to_string(),
            imprint: "Gollancz, 2012.".to_string(),
            status: "Available".to_string(),
            due_back: "2024-06-30".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_create().never();
        let mut books = MockBookStore::new();
        books.expect_exists().never();
        books.expect_list_titles().times(1).returning(|| Ok(titles()));

        let outcome = service(copies, books)
            .create(BookInstanceForm::default())
            .await
            .unwrap();
        match outcome {
            BookInstanceSubmission::Rejected { rejected, books } => {
                assert_eq!(rejected.errors.len(), 2);
                assert_eq!(books, titles());
            }
            BookInstanceSubmission::Saved(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn test_create_unknown_book() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_create().never();
        let mut books = MockBookStore::new();
        books.expect_exists().with(eq(3)).returning(|_| Ok(false));
        books.expect_list_titles().returning(|| Ok(vec![]));

        let outcome = service(copies, books).create(valid_form()).await.unwrap();
        match outcome {
            BookInstanceSubmission::Rejected { rejected, .. } => {
                assert_eq!(rejected.errors, vec![FieldError::new("book", "Book not found")]);
                assert_eq!(rejected.form, valid_form());
            }
            BookInstanceSubmission::Saved(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn test_create_saves() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_create().times(1).returning(|data| {
            Ok(BookInstance {
                id: 11,
                book_id: data.book_id,
                imprint: data.imprint.clone(),
                status: data.status,
                due_back: data.due_back,
            })
        });
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));

        let outcome = tokio_test::assert_ok!(service(copies, books).create(valid_form()).await);
        assert!(matches!(outcome, BookInstanceSubmission::Saved(i) if i.id == 11));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_get().with(eq(11)).returning(|id| Ok(detail(id)));
        copies
            .expect_update()
            .withf(|id, data| {
                *id == 11
                    && *data
                        == NewBookInstance {
                            book_id: 3,
                            imprint: "Gollancz, 2012.".to_string(),
                            status: BookInstanceStatus::Available,
                            due_back: NaiveDate::from_ymd_opt(2024, 6, 30),
                        }
            })
            .times(1)
            .returning(|id, data| {
                Ok(BookInstance {
                    id,
                    book_id: data.book_id,
                    imprint: data.imprint.clone(),
                    status: data.status,
                    due_back: data.due_back,
                })
            });
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));

        let outcome = service(copies, books).update(11, valid_form()).await.unwrap();
        match outcome {
            BookInstanceSubmission::Saved(instance) => {
                assert_eq!(instance.status, BookInstanceStatus::Available);
                assert_eq!(instance.imprint, "Gollancz, 2012.");
            }
            BookInstanceSubmission::Rejected { .. } => panic!("expected save"),
        }
    }

    #[tokio::test]
    async fn test_update_missing_copy() {
        let mut copies = MockBookInstanceStore::new();
        copies
            .expect_get()
            .returning(|id| Err(AppError::NotFound(format!("Book copy {} not found", id))));
        copies.expect_update().never();

        let result = service(copies, MockBookStore::new())
            .update(404, valid_form())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_copy() {
        let mut copies = MockBookInstanceStore::new();
        copies
            .expect_delete()
            .with(eq(5))
            .returning(|id| Err(AppError::NotFound(format!("Book copy {} not found", id))));

        let err = tokio_test::assert_err!(service(copies, MockBookStore::new()).delete(5).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_loads_choices() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_get().returning(|id| Ok(detail(id)));
        let mut books = MockBookStore::new();
        books.expect_list_titles().returning(|| Ok(titles()));

        let edit = service(copies, books).edit(2).await.unwrap();
        assert_eq!(edit.instance.id, 2);
        assert_eq!(edit.books.len(), 1);
    }

    #[tokio::test]
    async fn test_create_book_removed_before_insert() {
        let mut copies = MockBookInstanceStore::new();
        copies
            .expect_create()
            .times(1)
            .returning(|data| Err(AppError::Conflict(format!("Book {} not found", data.book_id))));
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));
        books.expect_list_titles().times(1).returning(|| Ok(vec![]));

        let outcome = service(copies, books).create(valid_form()).await.unwrap();
        match outcome {
            BookInstanceSubmission::Rejected { rejected, .. } => {
                assert_eq!(rejected.errors, vec![FieldError::new("book", "Book not found")]);
                assert_eq!(rejected.form, valid_form());
            }
            BookInstanceSubmission::Saved(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn test_update_book_removed_before_write() {
        let mut copies = MockBookInstanceStore::new();
        copies.expect_get().returning(|id| Ok(detail(id)));
        copies
            .expect_update()
            .returning(|_, data| Err(AppError::Conflict(format!("Book {} not found", data.book_id))));
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));
        books.expect_list_titles().returning(|| Ok(titles()));

        let outcome = service(copies, books).update(11, valid_form()).await.unwrap();
        assert!(matches!(
            outcome,
            BookInstanceSubmission::Rejected { rejected, .. } if rejected.errors[0].field == "book"
        ));
    }
}
