use crate::api::{ApiError, ErrorResponse, FieldErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use recipe_core::{validate_recipe_name, RecipeTransfer};

#[utoipa::path(
    get,
    path = "/get-recipe/{name}",
    tag = "recipes",
    params(
        ("name" = String, Path, description = "Recipe name (exact match)")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeTransfer),
        (status = 400, description = "Blank name (field errors) or no recipe with this name (single message)", body = [FieldErrorResponse]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Caller has no role", body = ErrorResponse)
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RecipeTransfer>, ApiError> {
    ApiError::check(validate_recipe_name(&name))?;

    let recipe = state.recipes.read(&name)?;
    Ok(Json(recipe))
}
