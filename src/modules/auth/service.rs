use anyhow::anyhow;
use servicehub_auth::{AuthError, Identity, TokenIssuer, TokenPair, TokenVerifier};
use servicehub_core::{AppError, Role, hash_password, verify_password};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::modules::accounts::{AccountStore, NewAccount, UserProfile};

use super::model::{AuthPayload, LoginRequest, RegisterRequest};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Carries an [`AuthError`]'s status and fixed message into an [`AppError`].
fn auth_failure(err: AuthError) -> AppError {
    AppError::new(err.status_code(), anyhow!(err.message()))
}

fn parse_subject(subject: &str) -> Result<Uuid, AuthError> {
    Uuid::parse_str(subject).map_err(|_| AuthError::InvalidCredential)
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(accounts, issuer, dto), fields(email = %dto.email))]
    pub fn register(
        accounts: &dyn AccountStore,
        issuer: &TokenIssuer,
        dto: RegisterRequest,
    ) -> Result<AuthPayload, AppError> {
        let account = accounts.insert(NewAccount {
            name: dto.name,
            email: dto.email,
            password_hash: hash_password(&dto.password)?,
            role: dto.role.unwrap_or(Role::Customer),
            phone: dto.phone,
            location: dto.location,
        })?;

        let tokens = issuer.issue_pair(&account.id.to_string(), account.role)?;
        info!(user_id = %account.id, role = %account.role, "Account registered");

        Ok(AuthPayload::new(UserProfile::from(&account), tokens))
    }

    #[instrument(skip(accounts, issuer, dto), fields(email = %dto.email))]
    pub fn login(
        accounts: &dyn AccountStore,
        issuer: &TokenIssuer,
        dto: LoginRequest,
    ) -> Result<AuthPayload, AppError> {
        let Some(account) = accounts.find_by_email(&dto.email)? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        };

        if !verify_password(&dto.password, &account.password_hash)? {
            warn!(user_id = %account.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        let tokens = issuer.issue_pair(&account.id.to_string(), account.role)?;
        info!(user_id = %account.id, "Login successful");

        Ok(AuthPayload::new(UserProfile::from(&account), tokens))
    }

    /// Exchanges a refresh token for a fresh pair.
    ///
    /// The new tokens carry the account's current role, not the role baked
    /// into the presented refresh token.
    #[instrument(skip_all)]
    pub fn refresh(
        accounts: &dyn AccountStore,
        verifier: &TokenVerifier,
        issuer: &TokenIssuer,
        refresh_token: Option<&str>,
    ) -> Result<TokenPair, AppError> {
        let refresh_token = refresh_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::bad_request(anyhow!("Refresh token is required.")))?;

        let claims = verifier.verify_refresh(refresh_token).map_err(auth_failure)?;
        let user_id = parse_subject(&claims.sub).map_err(auth_failure)?;

        let account = accounts.find_by_id(user_id)?.ok_or_else(|| {
            warn!(user_id = %user_id, "Refresh token for missing account");
            auth_failure(AuthError::InvalidCredential)
        })?;

        issuer.issue_pair(&account.id.to_string(), account.role)
    }

    #[instrument(skip(accounts), fields(user_id = %identity.subject()))]
    pub fn current_user(
        accounts: &dyn AccountStore,
        identity: &Identity,
    ) -> Result<UserProfile, AppError> {
        let not_found = || AppError::not_found(anyhow!("User not found."));

        let user_id = Uuid::parse_str(identity.subject()).map_err(|_| not_found())?;
        let account = accounts.find_by_id(user_id)?.ok_or_else(not_found)?;

        Ok(UserProfile::from(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use servicehub_auth::JwtConfig;

    use crate::modules::accounts::InMemoryAccountStore;

    fn fixtures() -> (InMemoryAccountStore, TokenIssuer, TokenVerifier) {
        let config = JwtConfig::new("service-test-secret");
        (
            InMemoryAccountStore::new(),
            TokenIssuer::new(&config),
            TokenVerifier::new(&config),
        )
    }

    fn register_dto(email: &str, role: Option<Role>) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
            role,
            phone: None,
            location: None,
        }
    }

    #[test]
    fn test_register_defaults_to_customer() {
        let (accounts, issuer, verifier) = fixtures();
        let payload =
            AuthService::register(&accounts, &issuer, register_dto("a@example.com", None)).unwrap();

        assert_eq!(payload.user.role, Role::Customer);
        let identity = verifier.verify(&payload.access_token).unwrap();
        assert_eq!(identity.subject(), payload.user.id.to_string());
        assert_eq!(identity.role(), Role::Customer);
    }

    #[test]
    fn test_login_failures_share_one_message() {
        let (accounts, issuer, _) = fixtures();
        AuthService::register(&accounts, &issuer, register_dto("b@example.com", None)).unwrap();

        let attempts = [("b@example.com", "wrong"), ("nobody@example.com", "s3cret-pass")];
        for (email, password) in attempts {
            let err = AuthService::login(
                &accounts,
                &issuer,
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.error.to_string(), INVALID_CREDENTIALS);
        }
    }

    #[test]
    fn test_refresh_requires_token() {
        let (accounts, issuer, verifier) = fixtures();
        for token in [None, Some(""), Some("  ")] {
            let err = AuthService::refresh(&accounts, &verifier, &issuer, token).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.error.to_string(), "Refresh token is required.");
        }
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let (accounts, issuer, verifier) = fixtures();
        let payload =
            AuthService::register(&accounts, &issuer, register_dto("c@example.com", None)).unwrap();

        let err = AuthService::refresh(&accounts, &verifier, &issuer, Some(&payload.access_token))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid token.");
    }

    #[test]
    fn test_refresh_for_unknown_account_is_invalid() {
        let (accounts, issuer, verifier) = fixtures();
        let orphan = issuer
            .issue_refresh_token(&Uuid::new_v4().to_string(), Role::Provider)
            .unwrap();

        let err = AuthService::refresh(&accounts, &verifier, &issuer, Some(&orphan)).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_current_user_unknown_subject() {
        let (accounts, issuer, verifier) = fixtures();
        let token = issuer
            .issue_access_token(&Uuid::new_v4().to_string(), Role::Customer)
            .unwrap();
        let identity = verifier.verify(&token).unwrap();

        let err = AuthService::current_user(&accounts, &identity).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), "User not found.");
    }
}
