//! Catalog home page

use axum::extract::State;

use crate::{error::AppResult, AppState};

use super::View;

/// Record counts for the catalog home page
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "index view", body = crate::services::catalog::CatalogCounts)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<View> {
    let counts = state.services.catalog.counts().await?;
    Ok(View::new("index", "Local Library Home").with("data", counts))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::test_support::{get, Mocks};

    #[tokio::test]
    async fn test_index_counts() {
        let mut mocks = Mocks::default();
        mocks.books.expect_count().returning(|| Ok(12));
        mocks.book_instances.expect_count().returning(|| Ok(30));
        mocks
            .book_instances
            .expect_count_with_status()
            .returning(|_| Ok(9));
        mocks.authors.expect_count().returning(|| Ok(6));
        mocks.genres.expect_count().returning(|| Ok(4));

        let (status, _, body) = get(mocks.router(), "/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "index");
        assert_eq!(body["data"]["book_count"], 12);
        assert_eq!(body["data"]["book_instance_available_count"], 9);
        assert_eq!(body["data"]["genre_count"], 4);
    }
}
