use crate::api::{ApiError, ErrorResponse, FieldErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use recipe_core::validate_recipe_name;

#[utoipa::path(
    delete,
    path = "/delete-recipe/{name}",
    tag = "recipes",
    params(
        ("name" = String, Path, description = "Recipe name (exact match)")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Blank name (field errors) or no recipe with this name (single message)", body = [FieldErrorResponse]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("basic_auth" = []))
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    ApiError::check(validate_recipe_name(&name))?;

    state.recipes.delete(&name)?;

    tracing::info!(recipe = %name, user = %user.username, "deleted recipe");
    Ok(StatusCode::NO_CONTENT)
}
