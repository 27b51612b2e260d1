//! Translation of body, validation and domain failures into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_core::{FieldError, RecipeError};
use serde::Serialize;
use utoipa::ToSchema;

/// Single error message, used for domain and auth failures
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// One rejected field of a request payload
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorResponse {
    #[schema(example = "greater_than_zero")]
    pub code: String,
    #[schema(example = "servings")]
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub rejected_value: Option<serde_json::Value>,
    #[schema(example = "Please specify a value greater than zero.")]
    pub message: String,
}

impl From<FieldError> for FieldErrorResponse {
    fn from(error: FieldError) -> Self {
        Self {
            code: error.code.as_str().to_string(),
            message: error.message().to_string(),
            field_name: error.field_name,
            rejected_value: error.rejected_value,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Body that is not JSON or does not fit the payload's field types.
    InvalidBody(JsonRejection),
    Validation(Vec<FieldError>),
    Recipe(RecipeError),
}

impl ApiError {
    /// `Ok` when no field errors were found.
    pub fn check(errors: Vec<FieldError>) -> Result<(), ApiError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl From<RecipeError> for ApiError {
    fn from(error: RecipeError) -> Self {
        ApiError::Recipe(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody(rejection) => {
                let message = rejection.body_text();
                tracing::debug!("Rejected request body: {}", message);
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Validation(errors) => {
                let body: Vec<FieldErrorResponse> =
                    errors.into_iter().map(FieldErrorResponse::from).collect();
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Recipe(error) if error.is_client_error() => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: error.to_string(),
                }),
            )
                .into_response(),
            ApiError::Recipe(error) => {
                tracing::error!("Recipe operation failed: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
