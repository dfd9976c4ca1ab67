use crate::api::recipes::get::RecipeResponse;
use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use larder_core::{submit_create, CreateOutcome, FormErrors, RecipeForm};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl CreateRecipeRequest {
    /// Fill a create form the way a user would: one row per entry.
    fn into_form(self) -> RecipeForm {
        let mut form = RecipeForm::new();
        form.set_name(&self.name);
        form.set_description(&self.description);
        form.set_tags(&self.tags);

        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if i > 0 {
                form.add_ingredient();
            }
            form.set_ingredient(i, ingredient);
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                form.add_step();
            }
            form.set_step(i, step);
        }

        form
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldErrorItem {
    /// Field path, e.g. `name` or `ingredients[2]`
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub fields: Vec<FieldErrorItem>,
}

impl From<&FormErrors> for ValidationErrorResponse {
    fn from(errors: &FormErrors) -> Self {
        Self {
            error: "Validation failed".to_string(),
            fields: errors
                .iter()
                .map(|(field, error)| FieldErrorItem {
                    field: field.to_string(),
                    message: error.to_string(),
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created; Location points at the detail view", body = RecipeResponse),
        (status = 422, description = "Invalid fields", body = ValidationErrorResponse),
        (status = 500, description = "The recipe could not be saved", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(app): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let mut form = request.into_form();

    match submit_create(&mut form, &app.store) {
        CreateOutcome::Created { recipe, redirect } => (
            StatusCode::CREATED,
            [(header::LOCATION, redirect.path())],
            Json(RecipeResponse::from(recipe)),
        )
            .into_response(),
        CreateOutcome::Invalid(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse::from(&errors)),
        )
            .into_response(),
        CreateOutcome::Failed(message) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::*;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_recipe() {
        let (state, _) = state_with(vec![]);
        let response = send(
            &state,
            Method::POST,
            "/recipes",
            Some(json!({
                "name": "  Tea ",
                "description": "Hot",
                "tags": ["drink"],
                "ingredients": ["water", "leaves"],
                "steps": ["boil", "steep"]
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string();

        let body = json(response).await;
        assert_eq!(body["name"], "Tea");
        assert_eq!(body["ingredients"], json!(["water", "leaves"]));
        assert_eq!(location, format!("/recipes/{}", body["id"].as_str().unwrap()));
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_reports_every_field_error() {
        let (state, _) = state_with(vec![]);
        let response = send(
            &state,
            Method::POST,
            "/recipes",
            Some(json!({
                "name": "Te",
                "description": " ",
                "tags": ["a", "b", "c", "d", "e", "f"],
                "ingredients": ["water", ""],
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json(response).await;
        assert_eq!(
            body["fields"],
            json!([
                {"field": "name", "message": "Minimum length is 3 characters"},
                {"field": "description", "message": "This field is required"},
                {"field": "ingredients[1]", "message": "This field is required"},
                {"field": "steps[0]", "message": "This field is required"},
                {"field": "tags", "message": "At most 5 tags are allowed"},
            ])
        );
        assert!(state.store.is_empty());
    }
}
