use crate::api::{ApiError, ErrorResponse, FieldErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use recipe_core::{validate_recipe, RecipeTransfer};

#[utoipa::path(
    post,
    path = "/create-recipe",
    tag = "recipes",
    request_body = RecipeTransfer,
    responses(
        (status = 204, description = "Recipe created"),
        (status = 400, description = "Unreadable body (single message), invalid payload (list of field errors) or a recipe with this name already exists (single message)", body = [FieldErrorResponse]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RecipeTransfer>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    ApiError::check(validate_recipe(&request))?;

    state.recipes.create(&request)?;

    tracing::info!(recipe = ?request.name, user = %user.username, "created recipe");
    Ok(StatusCode::NO_CONTENT)
}
