//! Token issuance and verification.
//!
//! Both halves take the signing secret from an injected [`JwtConfig`] at
//! construction and hold no other state, so a verifier built from a fixture
//! secret behaves exactly like the production one.
//!
//! Tokens are HS256 JWTs. Access tokens carry `typ = "access"`, refresh
//! tokens `typ = "refresh"`; each verifier entry point accepts only its own
//! type.
//!
//! # Example
//!
//! ```ignore
//! let issuer = TokenIssuer::new(&config);
//! let verifier = TokenVerifier::new(&config);
//!
//! let pair = issuer.issue_pair(&user_id, Role::Customer)?;
//! let identity = verifier.verify(&pair.access_token)?;
//! assert_eq!(identity.subject(), user_id);
//! ```

use std::fmt;

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use servicehub_config::JwtConfig;
use servicehub_core::{AppError, Role};
use uuid::Uuid;

use crate::claims::{Claims, Identity, RefreshTokenClaims, TokenType};
use crate::error::AuthError;

/// An access/refresh token pair as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn expires_at(now: i64, lifetime: i64) -> Result<i64, AppError> {
    now.checked_add(lifetime)
        .ok_or_else(|| AppError::internal(anyhow!("Token lifetime of {lifetime}s overflows")))
}

/// Signs access and refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenIssuer {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_config.secret.as_bytes()),
            access_token_expiry: jwt_config.access_token_expiry,
            refresh_token_expiry: jwt_config.refresh_token_expiry,
        }
    }

    /// Creates a short-lived access token for `subject`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue_access_token(&self, subject: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now,
            exp: expires_at(now, self.access_token_expiry)?,
            typ: TokenType::Access,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
    }

    /// Creates a long-lived refresh token for `subject`.
    ///
    /// Each call embeds a fresh `jti`, so two refresh tokens never collide.
    pub fn issue_refresh_token(&self, subject: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = RefreshTokenClaims {
            sub: subject.to_string(),
            role,
            iat: now,
            exp: expires_at(now, self.refresh_token_expiry)?,
            jti: Uuid::new_v4().to_string(),
            typ: TokenType::Refresh,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow!("Failed to create refresh token: {}", e)))
    }

    pub fn issue_pair(&self, subject: &str, role: Role) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, role)?,
            refresh_token: self.issue_refresh_token(subject, role)?,
        })
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

/// Verifies bearer credentials against the configured secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifies signature, expiry and token type of an access token.
    ///
    /// # Errors
    ///
    /// Every failure maps to [`AuthError::InvalidCredential`]; the cause is
    /// only logged at debug level.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidCredential
            })?
            .claims;

        if claims.typ != TokenType::Access {
            tracing::debug!(typ = ?claims.typ, "Non-access token presented as bearer credential");
            return Err(AuthError::InvalidCredential);
        }

        Ok(Identity::from_claims(claims))
    }

    /// Verifies a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshTokenClaims, AuthError> {
        let claims = decode::<RefreshTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::InvalidCredential
            })?
            .claims;

        if claims.typ != TokenType::Refresh {
            return Err(AuthError::InvalidCredential);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
