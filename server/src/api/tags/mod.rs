pub mod list;
pub mod suggest;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /tags endpoints (mounted at /tags)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_tags))
        .route("/suggest", get(suggest::suggest_tags))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_tags, suggest::suggest_tags),
    components(schemas(list::TagsResponse, suggest::SuggestTagsResponse))
)]
pub struct ApiDoc;
