use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsResponse {
    /// Every tag in use, sorted
    pub tags: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags used by any recipe", body = TagsResponse)
    )
)]
pub async fn list_tags(State(app): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(TagsResponse {
            tags: app.store.all_tags(),
        }),
    )
}
