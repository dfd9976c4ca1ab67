use crate::api::recipes::create::ValidationErrorResponse;
use crate::api::recipes::get::RecipeResponse;
use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::{validate_patch, RecipePatch};
use serde::Deserialize;
use utoipa::ToSchema;

/// Fields to replace. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(request: UpdateRecipeRequest) -> Self {
        RecipePatch {
            name: request.name,
            description: request.description,
            tags: request.tags,
            ingredients: request.ingredients,
            steps: request.steps,
        }
    }
}

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 422, description = "A replaced field is invalid", body = ValidationErrorResponse),
        (status = 500, description = "The change could not be saved", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    let patch = match validate_patch(request.into()) {
        Ok(patch) => patch,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse::from(&errors)),
            )
                .into_response()
        }
    };

    match app.store.update(&id, patch) {
        Ok(Some(recipe)) => (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Recipe not found"),
        Err(e) => {
            tracing::error!(%id, error = %e, "Failed to update recipe");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update recipe")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (state, added) = state_with(vec![new_recipe("Tea", "Hot", &["drink"])]);
        let id = &added[0].id;

        let response = send(
            &state,
            Method::PUT,
            &format!("/recipes/{id}"),
            Some(json!({"description": "Very hot", "tags": []})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state.store.get(id).unwrap();
        assert_eq!(stored.name, "Tea");
        assert_eq!(stored.description, "Very hot");
        assert!(stored.tags.is_empty());
        assert_eq!(stored.created_at, added[0].created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_recipe() {
        let (state, _) = state_with(vec![]);
        let response = send(
            &state,
            Method::PUT,
            "/recipes/missing",
            Some(json!({"name": "Nope"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn test_update_rejects_fields_that_would_empty_the_recipe() {
        let (state, added) = state_with(vec![new_recipe("Tea", "Hot", &["drink"])]);
        let id = &added[0].id;

        let response = send(
            &state,
            Method::PUT,
            &format!("/recipes/{id}"),
            Some(json!({"ingredients": [], "steps": [""], "name": ""})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["fields"],
            json!([
                {"field": "name", "message": "This field is required"},
                {"field": "ingredients[0]", "message": "This field is required"},
                {"field": "steps[0]", "message": "This field is required"},
            ])
        );
        assert_eq!(state.store.get(id).unwrap(), added[0]);
    }

    #[tokio::test]
    async fn test_update_trims_replaced_fields() {
        let (state, added) = state_with(vec![new_recipe("Tea", "Hot", &[])]);
        let id = &added[0].id;

        let response = send(
            &state,
            Method::PUT,
            &format!("/recipes/{id}"),
            Some(json!({"name": " Green tea ", "steps": [" boil ", "steep"]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state.store.get(id).unwrap();
        assert_eq!(stored.name, "Green tea");
        assert_eq!(stored.steps, vec!["boil", "steep"]);
    }
}
