use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use larder_core::form::{MAX_TAGS, NAME_MIN_LEN, UNSAVED_CHANGES_PROMPT};
use serde::Serialize;
use utoipa::ToSchema;

/// What a client needs to render the create form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateFormResponse {
    /// Autocomplete candidates for the tag editor
    pub tag_candidates: Vec<String>,
    pub max_tags: usize,
    pub name_min_length: usize,
    /// Prompt to show before leaving a dirty, invalid form
    pub unsaved_changes_prompt: String,
}

#[utoipa::path(
    get,
    path = "/recipes/new",
    tag = "recipes",
    responses(
        (status = 200, description = "Create form metadata", body = CreateFormResponse)
    )
)]
pub async fn new_recipe_form(State(app): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(CreateFormResponse {
            tag_candidates: app.store.all_tags(),
            max_tags: MAX_TAGS,
            name_min_length: NAME_MIN_LEN,
            unsaved_changes_prompt: UNSAVED_CHANGES_PROMPT.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_new_is_not_a_detail_lookup() {
        let (state, _) = state_with(vec![
            new_recipe("Tea", "Hot", &["drink", "quick"]),
            new_recipe("Toast", "Crunchy", &["quick"]),
        ]);

        let response = send(&state, Method::GET, "/recipes/new", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["tag_candidates"], json!(["drink", "quick"]));
        assert_eq!(body["max_tags"], 5);
        assert_eq!(body["name_min_length"], 3);
    }
}
