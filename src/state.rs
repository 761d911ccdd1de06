use std::sync::Arc;

use servicehub_auth::{JwtConfig, TokenIssuer, TokenVerifier};
use servicehub_config::CorsConfig;

use crate::modules::accounts::{AccountStore, InMemoryAccountStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub token_verifier: Arc<TokenVerifier>,
    pub token_issuer: Arc<TokenIssuer>,
    pub accounts: Arc<dyn AccountStore>,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state from explicit configuration; tests use this with a fixture secret.
    pub fn new(
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            token_verifier: Arc::new(TokenVerifier::new(jwt_config)),
            token_issuer: Arc::new(TokenIssuer::new(jwt_config)),
            accounts,
            cors_config,
        }
    }
}

/// Loads configuration from the environment.
///
/// Fails if `JWT_SECRET` is unset; the server never starts with a default secret.
pub fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    tracing::info!(config = ?jwt_config, "JWT configuration loaded");

    Ok(AppState::new(
        &jwt_config,
        CorsConfig::from_env(),
        Arc::new(InMemoryAccountStore::new()),
    ))
}
