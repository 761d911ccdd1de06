//! JWT claim structures and the verified identity.
//!
//! - [`Claims`]: access token payload
//! - [`RefreshTokenClaims`]: refresh token payload
//! - [`Identity`]: what the Authentication Gate attaches to a request

use serde::{Deserialize, Serialize};
use servicehub_core::Role;

/// Distinguishes access from refresh tokens signed with the same secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Principal role, `"user"` or `"provider"` on the wire
    pub role: Role,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    pub typ: TokenType,
}

/// JWT claims for refresh tokens.
///
/// Refresh tokens are long-lived and only accepted by the refresh endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    /// Unique token identifier so two refresh tokens issued in the same second differ
    pub jti: String,
    pub typ: TokenType,
}

/// Identity claims of an authenticated request.
///
/// Only [`crate::TokenVerifier`] constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    role: Role,
    issued_at: i64,
    expires_at: i64,
}

impl Identity {
    pub(crate) fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}
