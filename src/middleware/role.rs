//! Role gates as axum layers and extractors.
//!
//! Both forms pull [`AuthUser`] first, so the Authentication Gate always runs
//! before the role check and a missing token yields 401, never 403.

use axum::{extract::Request, middleware::Next, response::Response};
use servicehub_auth::{AuthError, RoleGate};

use crate::middleware::auth::AuthUser;

/// Runs `gate` against an authenticated request and forwards it on success.
pub async fn require_role(
    gate: RoleGate,
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    gate.check(&auth_user.0)?;
    Ok(next.run(req).await)
}

/// Layer admitting customers only.
///
/// ```ignore
/// Router::new()
///     .route("/bookings", post(create_booking))
///     .route_layer(middleware::from_fn_with_state(state, require_customer))
/// ```
pub async fn require_customer(
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_role(RoleGate::CUSTOMERS, auth_user, req, next).await
}

/// Layer admitting service providers only.
pub async fn require_provider(
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_role(RoleGate::PROVIDERS, auth_user, req, next).await
}

/// Generates an extractor that authenticates and then applies a [`RoleGate`].
#[macro_export]
macro_rules! require_role {
    ($name:ident, $gate:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::servicehub_auth::AuthError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                use $crate::middleware::auth::AuthUser;
                use $crate::state::AppState;
                use axum::extract::FromRequestParts;

                let auth_user =
                    <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
                        .await?;

                $gate.check(&auth_user.0)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(CustomerOnly, servicehub_auth::RoleGate::CUSTOMERS);
require_role!(ProviderOnly, servicehub_auth::RoleGate::PROVIDERS);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        middleware,
        routing::get,
    };
    use http_body_util::BodyExt;
    use servicehub_auth::{JwtConfig, TokenIssuer};
    use servicehub_config::CorsConfig;
    use servicehub_core::Role;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::accounts::InMemoryAccountStore;
    use crate::state::AppState;

    const SECRET: &str = "role-middleware-secret";

    fn app() -> Router {
        let state = AppState::new(
            &JwtConfig::new(SECRET),
            CorsConfig::from_lookup(|_| None),
            Arc::new(InMemoryAccountStore::new()),
        );

        Router::new()
            .route(
                "/layer/customer",
                get(|| async { "ok" })
                    .route_layer(middleware::from_fn_with_state(state.clone(), require_customer)),
            )
            .route(
                "/layer/provider",
                get(|| async { "ok" })
                    .route_layer(middleware::from_fn_with_state(state.clone(), require_provider)),
            )
            .route(
                "/extract/customer",
                get(|CustomerOnly(user): CustomerOnly| async move { user.subject().to_string() }),
            )
            .route(
                "/extract/provider",
                get(|ProviderOnly(user): ProviderOnly| async move { user.subject().to_string() }),
            )
            .with_state(state)
    }

    fn bearer(role: Role) -> String {
        let token = TokenIssuer::new(&JwtConfig::new(SECRET))
            .issue_access_token("subject-1", role)
            .unwrap();
        format!("Bearer {token}")
    }

    async fn get_status(
        path: &str,
        authorization: Option<String>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = axum::http::Request::builder().uri(path);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        for (path, role) in [
            ("/layer/customer", Role::Customer),
            ("/layer/provider", Role::Provider),
            ("/extract/customer", Role::Customer),
            ("/extract/provider", Role::Provider),
        ] {
            let (status, _) = get_status(path, Some(bearer(role))).await;
            assert_eq!(status, StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden_with_role_message() {
        for (path, role, message) in [
            ("/layer/customer", Role::Provider, "Access denied. Customers only."),
            ("/extract/customer", Role::Provider, "Access denied. Customers only."),
            ("/layer/provider", Role::Customer, "Access denied. Service providers only."),
            ("/extract/provider", Role::Customer, "Access denied. Service providers only."),
        ] {
            let (status, body) = get_status(path, Some(bearer(role))).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], message);
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_is_401_not_403() {
        for path in [
            "/layer/customer",
            "/layer/provider",
            "/extract/customer",
            "/extract/provider",
        ] {
            let (status, body) = get_status(path, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
            assert_eq!(body["message"], "Access denied. No token provided.");
        }
    }
}
