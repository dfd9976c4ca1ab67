use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use larder_core::routes::LIST_PATH;
use larder_core::{highlight, ListView, Location, QueryParams, Recipe};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Name with search matches wrapped in `<mark>`, HTML-escaped
    pub name_html: String,
    /// Description with search matches wrapped in `<mark>`, HTML-escaped
    pub description_html: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl RecipeSummary {
    fn new(recipe: Recipe, query: &str) -> Self {
        Self {
            name_html: highlight(&recipe.name, query),
            description_html: highlight(&recipe.description, query),
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            tags: recipe.tags,
            created_at: recipe.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Number of recipes matching the filter
    pub total: usize,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterEcho {
    pub search: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub pagination: PaginationMetadata,
    pub filter: FilterEcho,
    /// Canonical location for this filter state. Unrelated query parameters are kept.
    pub location: String,
    pub all_tags: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive text matched against name and description"),
        ("tags" = Option<Vec<String>>, Query, description = "Required tags; repeat the parameter for several (AND)"),
        ("page" = Option<usize>, Query, description = "Zero-based page index (default: 0)")
    ),
    responses(
        (status = 200, description = "One page of recipes matching the filter", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    State(app): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    let mut view = ListView::new(app.store.snapshot(), app.settings.page_size);
    view.apply_location(&Location::new(LIST_PATH, params));

    let snapshot = view.snapshot();
    let location = view.location().to_string();

    let recipes = snapshot
        .recipes
        .into_iter()
        .map(|recipe| RecipeSummary::new(recipe, &snapshot.query))
        .collect();

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            recipes,
            pagination: PaginationMetadata {
                total: snapshot.total,
                page: snapshot.page_index,
                page_size: snapshot.page_size,
                page_count: snapshot.page_count,
            },
            filter: FilterEcho {
                search: snapshot.query,
                tags: snapshot.tags,
            },
            location,
            all_tags: snapshot.all_tags,
        }),
    )
}
