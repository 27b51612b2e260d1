use crate::api::{ApiError, ErrorResponse, FieldErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use recipe_core::{validate_recipe, RecipeTransfer};

/// Full replace of the recipe named in the payload. The stored id and creation
/// time are kept; everything else comes from the request.
#[utoipa::path(
    post,
    path = "/update-recipe",
    tag = "recipes",
    request_body = RecipeTransfer,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Unreadable body (single message), invalid payload (list of field errors) or no recipe with this name (single message)", body = [FieldErrorResponse]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RecipeTransfer>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    ApiError::check(validate_recipe(&request))?;

    state.recipes.update(&request)?;

    tracing::info!(recipe = ?request.name, user = %user.username, "updated recipe");
    Ok(StatusCode::NO_CONTENT)
}
