//! The Authentication Gate and Role Gates as plain functions.
//!
//! These never touch storage or global state; the axum adapters in the
//! server crate only move their results into request extensions or
//! responses.

use axum::http::{HeaderMap, header};
use servicehub_core::Role;

use crate::claims::Identity;
use crate::error::AuthError;
use crate::jwt::TokenVerifier;

/// Case-sensitive scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// A missing header, a value without the `Bearer ` prefix and an empty token
/// all yield `None`.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Authentication Gate.
///
/// # Errors
///
/// - [`AuthError::MissingCredential`] when no bearer token is present
/// - [`AuthError::InvalidCredential`] when the token fails verification
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Identity, AuthError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(authorization).ok_or(AuthError::MissingCredential)?;

    verifier.verify(token)
}

/// Role Gate, parameterised by the role a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    pub const CUSTOMERS: RoleGate = RoleGate::new(Role::Customer);
    pub const PROVIDERS: RoleGate = RoleGate::new(Role::Provider);

    pub const fn new(required: Role) -> Self {
        Self { required }
    }

    pub fn required(&self) -> Role {
        self.required
    }

    /// Passes when the identity's role equals the required role.
    pub fn check(&self, identity: &Identity) -> Result<(), AuthError> {
        if identity.role() == self.required {
            Ok(())
        } else {
            tracing::debug!(
                subject = %identity.subject(),
                role = %identity.role(),
                required = %self.required,
                "Role gate denied request"
            );
            Err(AuthError::RoleMismatch(self.required))
        }
    }
}
