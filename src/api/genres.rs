//! Genre pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    error::{AppError, AppResult},
    models::{
        form::FieldError,
        genre::{DeleteGenreForm, GenreForm},
        linked, Canonical, Genre, Linked,
    },
    services::genres::{GenreCreation, GenreDeletion, GenreUpdate, GenreWithBooks},
    AppState,
};

use super::{Form, Path, View};

fn form_view(title: &str, form: &GenreForm, errors: &[FieldError]) -> View {
    View::new("genre_form", title)
        .with("genre", form)
        .with("errors", errors)
}

fn delete_view(current: &GenreWithBooks) -> View {
    View::new("genre_delete", "Delete Genre")
        .with("genre", Linked::from(&current.genre))
        .with("genre_books", linked(&current.books))
}

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "genre_list view")
    )
)]
pub async fn genre_list(State(state): State<AppState>) -> AppResult<View> {
    let genres = state.services.genres.list().await?;
    Ok(View::new("genre_list", "Genre List").with("genre_list", linked(&genres)))
}

/// Genre with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_detail view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let current = state.services.genres.detail(id).await?;
    Ok(View::new("genre_detail", "Genre Detail")
        .with("genre", Linked::from(&current.genre))
        .with("genre_books", linked(&current.books)))
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "genre_form view")
    )
)]
pub async fn genre_create_get() -> View {
    form_view("Create Genre", &GenreForm::default(), &[])
}

/// Create a genre, or redirect to the one that already has this name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new or existing genre"),
        (status = 200, description = "genre_form view with errors")
    )
)]
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let response = match state.services.genres.create(form).await? {
        GenreCreation::Created(genre) | GenreCreation::Existing(genre) => {
            Redirect::to(&genre.url()).into_response()
        }
        GenreCreation::Rejected(rejected) => {
            form_view("Create Genre", &rejected.form, &rejected.errors).into_response()
        }
    };
    Ok(response)
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_delete view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let current = state.services.genres.detail(id).await?;
    Ok(delete_view(&current))
}

/// Delete a genre that has no books
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body(content = DeleteGenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted, redirect to the genre list"),
        (status = 200, description = "genre_delete view, books still use the genre"),
        (status = 400, description = "Form id does not match the path", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    if form.genreid != id {
        return Err(AppError::BadRequest(format!(
            "Genre id {} does not match the page for genre {}",
            form.genreid, id
        )));
    }

    let response = match state.services.genres.delete(id).await? {
        GenreDeletion::Deleted => Redirect::to(&Genre::list_url()).into_response(),
        GenreDeletion::InUse(current) => delete_view(&current).into_response(),
    };
    Ok(response)
}

/// Genre form filled with the current values
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_form view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let genre = state.services.genres.get(id).await?;
    Ok(form_view("Update Genre", &GenreForm::from(&genre), &[]))
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the updated genre"),
        (status = 200, description = "genre_form view with errors"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let response = match state.services.genres.update(id, form).await? {
        GenreUpdate::Updated(genre) => Redirect::to(&genre.url()).into_response(),
        GenreUpdate::Rejected(rejected) => {
            form_view("Update Genre", &rejected.form, &rejected.errors).into_response()
        }
    };
    Ok(response)
}
