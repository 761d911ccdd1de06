use std::env;
use std::fmt;

use anyhow::{Context, bail};

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600; // 1 hour
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604800; // 7 days
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60; // 10 years

/// Signing configuration for access and refresh tokens.
///
/// The secret has no default and is redacted from `Debug` output.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }

    /// Loads `JWT_SECRET`, `JWT_ACCESS_EXPIRY` and `JWT_REFRESH_EXPIRY`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        Ok(Self {
            secret,
            access_token_expiry: parse_seconds(
                &lookup,
                "JWT_ACCESS_EXPIRY",
                DEFAULT_ACCESS_TOKEN_EXPIRY,
            )?,
            refresh_token_expiry: parse_seconds(
                &lookup,
                "JWT_REFRESH_EXPIRY",
                DEFAULT_REFRESH_TOKEN_EXPIRY,
            )?,
        })
    }
}

fn parse_seconds<F>(lookup: &F, key: &str, default: i64) -> anyhow::Result<i64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            let seconds: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a number of seconds"))?;
            if seconds <= 0 {
                bail!("{key} must be positive");
            }
            if seconds > MAX_TOKEN_EXPIRY {
                bail!("{key} must not exceed {MAX_TOKEN_EXPIRY} seconds");
            }
            Ok(seconds)
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}
