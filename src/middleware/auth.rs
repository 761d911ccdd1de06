use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use servicehub_auth::{AuthError, Identity, authenticate};
use servicehub_core::Role;

use crate::state::AppState;

/// Extractor that runs the Authentication Gate and yields the verified identity.
///
/// The identity is cached in request extensions, so stacking this extractor
/// behind [`require_auth`] or a role layer verifies the token only once.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn subject(&self) -> &str {
        self.0.subject()
    }

    pub fn role(&self) -> Role {
        self.0.role()
    }

    pub fn is_customer(&self) -> bool {
        self.role() == Role::Customer
    }

    pub fn is_provider(&self) -> bool {
        self.role() == Role::Provider
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let identity = authenticate(&parts.headers, &state.token_verifier)?;
        let auth_user = AuthUser(identity);
        parts.extensions.insert(auth_user.clone());

        Ok(auth_user)
    }
}

/// Route layer form of the Authentication Gate.
///
/// Rejects with 401 before the handler runs; on success the identity is
/// available to the handler through [`AuthUser`] or `Extension<AuthUser>`.
pub async fn require_auth(auth_user: AuthUser, req: Request, next: Next) -> Response {
    tracing::debug!(
        user_id = %auth_user.subject(),
        role = %auth_user.role(),
        "Request authenticated"
    );
    next.run(req).await
}
