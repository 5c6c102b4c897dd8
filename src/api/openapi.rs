//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{book_instances, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Library catalog pages: genres and book copies. \
                       Pages answer with view payloads or 303 redirects.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Genres
        genres::genre_list,
        genres::genre_detail,
        genres::genre_create_get,
        genres::genre_create_post,
        genres::genre_delete_get,
        genres::genre_delete_post,
        genres::genre_update_get,
        genres::genre_update_post,
        // Book copies
        book_instances::bookinstance_list,
        book_instances::bookinstance_detail,
        book_instances::bookinstance_create_get,
        book_instances::bookinstance_create_post,
        book_instances::bookinstance_delete_get,
        book_instances::bookinstance_delete_post,
        book_instances::bookinstance_update_get,
        book_instances::bookinstance_update_post,
    ),
    components(
        schemas(
            crate::models::genre::Genre,
            crate::models::genre::GenreForm,
            crate::models::genre::DeleteGenreForm,
            crate::models::book::BookTitle,
            crate::models::book::BookSummary,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceDetail,
            crate::models::book_instance::BookInstanceStatus,
            crate::models::book_instance::BookInstanceForm,
            crate::models::book_instance::DeleteBookInstanceForm,
            crate::models::form::FieldError,
            crate::services::catalog::CatalogCounts,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog overview"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
