use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::credentials::{AuthUser, CredentialStore, Credentials, Role};
use std::sync::Arc;

pub const REALM_CHALLENGE: &str = "Basic realm=\"recipe-system\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidCredentials,
    Forbidden,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Missing Authorization header"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Insufficient role for this operation",
            ),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                message: message.to_string(),
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(REALM_CHALLENGE),
            );
        }

        response
    }
}

/// Roles allowed to call an endpoint with the given method.
pub fn allowed_roles(method: &Method) -> &'static [Role] {
    if method == Method::GET || method == Method::HEAD {
        &[Role::User, Role::Admin]
    } else {
        &[Role::Admin]
    }
}

fn credentials_from_headers(headers: &HeaderMap) -> Result<Credentials, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    Credentials::from_basic_header(auth_str).map_err(|_| AuthError::InvalidFormat)
}

/// Password hashing is CPU-bound, so it runs on the blocking pool.
async fn authenticate(
    store: Arc<dyn CredentialStore>,
    credentials: Credentials,
) -> Result<AuthUser, AuthError> {
    let username = credentials.username.clone();
    let outcome = tokio::task::spawn_blocking(move || store.authenticate(&credentials)).await;

    match outcome {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            tracing::info!(username = %username, "rejected credentials");
            Err(AuthError::InvalidCredentials)
        }
        Err(e) => {
            tracing::error!("Credential check failed: {}", e);
            Err(AuthError::Internal)
        }
    }
}

/// Middleware enforcing HTTP Basic auth plus the role required by the method.
/// On success the [`AuthUser`] is available to handlers as an `Extension`.
pub async fn require_role(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let credentials = match credentials_from_headers(request.headers()) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    let user = match authenticate(state.credentials.clone(), credentials).await {
        Ok(u) => u,
        Err(e) => return e.into_response(),
    };

    if !user.has_any_role(allowed_roles(request.method())) {
        tracing::info!(
            username = %user.username,
            method = %request.method(),
            "forbidden by role"
        );
        return AuthError::Forbidden.into_response();
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    #[test]
    fn test_allowed_roles() {
        assert_eq!(allowed_roles(&Method::GET), &[Role::User, Role::Admin]);
        assert_eq!(allowed_roles(&Method::POST), &[Role::Admin]);
        assert_eq!(allowed_roles(&Method::DELETE), &[Role::Admin]);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            credentials_from_headers(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn test_bearer_is_wrong_format() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tttt"),
        );
        assert_eq!(
            credentials_from_headers(&headers),
            Err(AuthError::InvalidFormat)
        );
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = AuthError::MissingHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            REALM_CHALLENGE
        );

        let response = AuthError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_authenticate_on_blocking_pool() {
        let store: Arc<dyn CredentialStore> = Arc::new(
            StaticCredentials::new(true)
                .unwrap()
                .with_user("admin", "secret", [Role::User, Role::Admin])
                .unwrap(),
        );
        let credentials = |username: &str, password: &str| Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let user = authenticate(store.clone(), credentials("admin", "secret"))
            .await
            .unwrap();
        assert_eq!(user.username, "admin");

        assert_eq!(
            authenticate(store.clone(), credentials("admin", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            authenticate(store, credentials("nobody", "secret")).await,
            Err(AuthError::InvalidCredentials)
        );
    }
}
