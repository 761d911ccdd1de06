use axum::extract::State;
use axum::http::StatusCode;
use servicehub_core::{ApiResponse, AppError, ErrorBody, MessageResponse};
use tracing::instrument;

use crate::validator::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::{
    AuthPayload, LoginRequest, MeResponse, RefreshRequest, RegisterRequest, TokenResponse,
};
use super::service::AuthService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthPayload),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AuthPayload>), AppError> {
    let payload = AuthService::register(state.accounts.as_ref(), &state.token_issuer, dto)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(payload).with_message("User registered successfully."),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthPayload),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Invalid email or empty password", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthPayload>, AppError> {
    let payload = AuthService::login(state.accounts.as_ref(), &state.token_issuer, dto)?;
    Ok(ApiResponse::data(payload).with_message("Login successful."))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 400, description = "Refresh token missing", body = ErrorBody),
        (status = 401, description = "Refresh token invalid or expired", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<ApiResponse<TokenResponse>, AppError> {
    let tokens = AuthService::refresh(
        state.accounts.as_ref(),
        &state.token_verifier,
        &state.token_issuer,
        dto.refresh_token.as_deref(),
    )?;
    Ok(ApiResponse::data(TokenResponse::from(tokens)))
}

/// Log out
///
/// Tokens are stateless; the client discards its cached session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout_user() -> MessageResponse {
    MessageResponse::new("Logged out successfully.")
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Account no longer exists", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %auth_user.subject()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<MeResponse>, AppError> {
    let user = AuthService::current_user(state.accounts.as_ref(), &auth_user.0)?;
    Ok(ApiResponse::data(MeResponse { user }))
}
