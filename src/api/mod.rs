//! HTTP handlers for the catalog pages

pub mod book_instances;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod view;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::get,
    Router,
};

use crate::{error::AppError, AppState};

pub use view::View;

/// `axum::Form` rejecting malformed bodies with a JSON `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct Form<T>(pub T);

/// `axum::extract::Path` rejecting malformed segments with a JSON `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Catalog and health routes, without the documentation or middleware layers
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Genres
        .route("/genres", get(genres::genre_list))
        .route(
            "/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/genre/:id", get(genres::genre_detail))
        .route(
            "/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        // Book copies
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get)
                .post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get)
                .post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get)
                .post(book_instances::bookinstance_update_post),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest(crate::models::CATALOG_ROOT, catalog)
        .with_state(state)
}
