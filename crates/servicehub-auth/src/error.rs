//! Authentication and authorization failures.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use servicehub_core::{ErrorBody, Role};

/// Terminal outcome of a gate.
///
/// Messages are fixed. `InvalidCredential` covers malformed, mis-signed and
/// expired tokens alike so callers cannot tell which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header
    MissingCredential,
    /// Token failed verification
    InvalidCredential,
    /// Authenticated, but the route requires this role
    RoleMismatch(Role),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::RoleMismatch(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "Access denied. No token provided.",
            AuthError::InvalidCredential => "Invalid token.",
            AuthError::RoleMismatch(required) => required.denial_message(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AuthError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_credential_response() {
        let (status, body) = body_of(AuthError::MissingCredential).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Access denied. No token provided.");
    }

    #[tokio::test]
    async fn test_invalid_credential_response() {
        let (status, body) = body_of(AuthError::InvalidCredential).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token.");
    }

    #[tokio::test]
    async fn test_role_mismatch_response() {
        let (status, body) = body_of(AuthError::RoleMismatch(Role::Customer)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access denied. Customers only.");

        let (status, body) = body_of(AuthError::RoleMismatch(Role::Provider)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access denied. Service providers only.");
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(AuthError::InvalidCredential.to_string(), "Invalid token.");
    }
}
