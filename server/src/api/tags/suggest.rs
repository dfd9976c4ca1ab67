use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::{QueryParams, TagEditor};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestTagsResponse {
    pub suggestions: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/tags/suggest",
    tag = "tags",
    params(
        ("entry" = Option<String>, Query, description = "Text typed so far; matched case-insensitively"),
        ("selected" = Option<Vec<String>>, Query, description = "Tags already chosen; repeat for several")
    ),
    responses(
        (status = 200, description = "Existing tags the user may pick next", body = SuggestTagsResponse)
    )
)]
pub async fn suggest_tags(
    State(app): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    let mut editor = TagEditor::new(app.store.all_tags());
    editor.write_value(
        params
            .get_all("selected")
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    editor.set_entry(params.get("entry").unwrap_or_default());

    let suggestions = editor.suggestions().into_iter().map(str::to_string).collect();
    (StatusCode::OK, Json(SuggestTagsResponse { suggestions }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_suggestions_skip_selected_tags() {
        let (state, _) = state_with(vec![
            new_recipe("Salad", "Green", &["vegan", "vegetarian", "quick"]),
        ]);

        let body = json(
            send(
                &state,
                Method::GET,
                "/tags/suggest?entry=VEG&selected=vegan",
                None,
            )
            .await,
        )
        .await;
        assert_eq!(body["suggestions"], json!(["vegetarian"]));

        let body = json(send(&state, Method::GET, "/tags/suggest", None).await).await;
        assert_eq!(body["suggestions"], json!(["quick", "vegan", "vegetarian"]));
    }
}
