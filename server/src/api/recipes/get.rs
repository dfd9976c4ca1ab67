use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::{DateTime, Utc};
use larder_core::{format_created, resolve_detail, DetailOutcome, Recipe};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Creation date for display, e.g. "October 18, 2026"
    pub created_display: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            created_display: format_created(&recipe.created_at),
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            created_at: recipe.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 303, description = "Unknown recipe, redirects to the list")
    )
)]
pub async fn get_recipe(State(app): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match resolve_detail(&app.store, Some(&id)) {
        DetailOutcome::Found(recipe) => {
            (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response()
        }
        DetailOutcome::Redirect(route) => {
            tracing::debug!(%id, "Unknown recipe, redirecting");
            Redirect::to(&route.path()).into_response()
        }
    }
}
