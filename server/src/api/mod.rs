pub mod error;
pub mod public;
pub mod recipes;

pub use error::{ApiError, ErrorResponse, FieldErrorResponse};

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipe System", description = "CRUD API for recipes"),
        components(schemas(ErrorResponse, FieldErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![public::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let spec = openapi();
        for path in [
            "/create-recipe",
            "/get-recipe/{name}",
            "/update-recipe",
            "/delete-recipe/{name}",
            "/health",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }

        let components = spec.components.unwrap();
        assert!(components.security_schemes.contains_key("basic_auth"));
        assert!(components.schemas.contains_key("RecipeTransfer"));
    }
}
