pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use recipe_core::RecipeTransfer;
use utoipa::OpenApi;

/// Returns the router for the recipe endpoints. Callers must layer
/// `auth::require_role` on top.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-recipe", post(create::create_recipe))
        .route("/get-recipe/{name}", get(get::get_recipe))
        .route("/update-recipe", post(update::update_recipe))
        .route("/delete-recipe/{name}", delete(delete::delete_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(RecipeTransfer))
)]
pub struct ApiDoc;
