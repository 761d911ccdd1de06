//! # ServiceHub Auth
//!
//! Request authentication and role authorization for the ServiceHub API.
//!
//! This crate provides:
//!
//! - [`claims`]: token payloads and the verified [`Identity`]
//! - [`jwt`]: [`TokenIssuer`] and [`TokenVerifier`], both built from an injected [`JwtConfig`]
//! - [`error`]: the [`AuthError`] taxonomy and its HTTP rendering
//! - [`gate`]: the Authentication Gate and [`RoleGate`] as plain functions
//!
//! # Gates
//!
//! A gate takes the request (or what an earlier gate produced) and either
//! continues with a richer value or terminates with an error response:
//!
//! ```text
//! headers ─authenticate─▶ Ok(Identity) ─RoleGate::check─▶ Ok(()) ─▶ handler
//!               │                                  │
//!               └─ Err(MissingCredential |         └─ Err(RoleMismatch) → 403
//!                      InvalidCredential) → 401
//! ```
//!
//! [`RoleGate::check`] borrows an [`Identity`], and an `Identity` can only be
//! produced by [`TokenVerifier::verify`], so a role check cannot run ahead of
//! authentication.
//!
//! # Example
//!
//! ```ignore
//! use servicehub_auth::{RoleGate, TokenIssuer, TokenVerifier, authenticate};
//! use servicehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let issuer = TokenIssuer::new(&config);
//! let verifier = TokenVerifier::new(&config);
//!
//! let token = issuer.issue_access_token(&user_id, Role::Provider)?;
//! let identity = verifier.verify(&token)?;
//! RoleGate::PROVIDERS.check(&identity)?;
//! ```

pub mod claims;
pub mod error;
pub mod gate;
pub mod jwt;

pub use servicehub_config::JwtConfig;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity, RefreshTokenClaims, TokenType};
pub use error::AuthError;
pub use gate::{BEARER_PREFIX, RoleGate, authenticate, bearer_token};
pub use jwt::{TokenIssuer, TokenPair, TokenVerifier};
