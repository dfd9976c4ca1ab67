pub mod recipes;
pub mod tags;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Json, Router};
use larder_core::routes::LIST_PATH;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Every route. `/` and unknown paths redirect to the recipe list.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipes::router())
        .nest("/tags", tags::router())
        .fallback(redirect_to_list)
}

async fn redirect_to_list() -> Redirect {
    Redirect::to(LIST_PATH)
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Larder", description = "Recipe manager API"),
    components(schemas(ErrorResponse))
)]
struct ApiDoc;

/// The API document with every module's paths and schemas.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(recipes::ApiDoc::openapi())
        .merge_from(tags::ApiDoc::openapi())
}
