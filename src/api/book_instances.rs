//! Book copy pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstanceForm, DeleteBookInstanceForm},
        form::FieldError,
        linked, BookInstance, BookInstanceDetail, BookInstanceStatus, BookTitle, Canonical, Linked,
    },
    services::book_instances::{BookInstanceEdit, BookInstanceSubmission},
    AppState,
};

use super::{Form, Path, View};

fn form_view(
    title: &str,
    form: &BookInstanceForm,
    books: &[BookTitle],
    errors: &[FieldError],
) -> View {
    View::new("bookinstance_form", title)
        .with("bookinstance", form)
        .with("selected_book", form.selected_book())
        .with("book_list", linked(books))
        .with("status_list", BookInstanceStatus::ALL)
        .with("errors", errors)
}

fn submission_response(title: &str, submission: BookInstanceSubmission) -> Response {
    match submission {
        BookInstanceSubmission::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        BookInstanceSubmission::Rejected { rejected, books } => {
            form_view(title, &rejected.form, &books, &rejected.errors).into_response()
        }
    }
}

fn instance_view(template: &'static str, title: String, instance: &BookInstanceDetail) -> View {
    View::new(template, title)
        .with("bookinstance", Linked::from(instance))
        .with("book_url", instance.book_url())
}

/// List all copies with their books
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_list view")
    )
)]
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<View> {
    let instances = state.services.book_instances.list().await?;
    Ok(View::new("bookinstance_list", "Book Instance List")
        .with("bookinstance_list", linked(&instances)))
}

/// One copy with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book copy ID")),
    responses(
        (status = 200, description = "bookinstance_detail view"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let instance = state.services.book_instances.detail(id).await?;
    let title = format!("Copy: {}", instance.book_title);
    Ok(instance_view("bookinstance_detail", title, &instance))
}

/// Empty copy form with the book choices
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_form view")
    )
)]
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<View> {
    let books = state.services.book_instances.book_choices().await?;
    Ok(form_view(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        &[],
    ))
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new copy"),
        (status = 200, description = "bookinstance_form view with errors")
    )
)]
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let submission = state.services.book_instances.create(form).await?;
    Ok(submission_response("Create BookInstance", submission))
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book copy ID")),
    responses(
        (status = 200, description = "bookinstance_delete view"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let instance = state.services.book_instances.detail(id).await?;
    Ok(instance_view(
        "bookinstance_delete",
        "Delete BookInstance".to_string(),
        &instance,
    ))
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book copy ID")),
    request_body(content = DeleteBookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted, redirect to the copy list"),
        (status = 400, description = "Form id does not match the path", body = crate::error::ErrorResponse),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Redirect> {
    if form.bookinstance != id {
        return Err(AppError::BadRequest(format!(
            "Book copy id {} does not match the page for copy {}",
            form.bookinstance, id
        )));
    }

    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to(&BookInstance::list_url()))
}

/// Copy form filled with the current values
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book copy ID")),
    responses(
        (status = 200, description = "bookinstance_form view"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let BookInstanceEdit { instance, books } = state.services.book_instances.edit(id).await?;
    Ok(form_view(
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
        &books,
        &[],
    ))
}

/// Overwrite a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book copy ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the updated copy"),
        (status = 200, description = "bookinstance_form view with errors"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let submission = state.services.book_instances.update(id, form).await?;
    Ok(submission_response("Update BookInstance", submission))
}
