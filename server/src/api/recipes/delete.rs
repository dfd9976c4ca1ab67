use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_core::flows::DELETE_CONFIRM_PROMPT;
use larder_core::{delete_recipe as delete_from_store, DeleteOutcome, Preconfirmed};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeleteRecipeParams {
    /// Must be `true`; the client asks the user before sending the request
    #[serde(default)]
    pub confirm: bool,
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID"),
        DeleteRecipeParams
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 428, description = "Deletion was not confirmed", body = ErrorResponse),
        (status = 500, description = "The deletion could not be saved", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteRecipeParams>,
) -> impl IntoResponse {
    match delete_from_store(&app.store, &id, &Preconfirmed(params.confirm)) {
        Ok(DeleteOutcome::Deleted(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(DeleteOutcome::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "Recipe not found")
        }
        Ok(DeleteOutcome::Cancelled) => {
            error_response(StatusCode::PRECONDITION_REQUIRED, DELETE_CONFIRM_PROMPT)
        }
        Err(e) => {
            tracing::error!(%id, error = %e, "Failed to delete recipe");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete recipe")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (state, added) = state_with(vec![new_recipe("Tea", "Hot", &[])]);
        let id = &added[0].id;

        let response = send(&state, Method::DELETE, &format!("/recipes/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(
            json(response).await["error"],
            "Are you sure you want to delete this recipe?"
        );
        assert_eq!(state.store.len(), 1);

        let uri = format!("/recipes/{id}?confirm=true");
        let response = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.store.is_empty());

        let response = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
