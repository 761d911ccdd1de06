use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::UserProfile;
use crate::modules::auth::model::{
    AuthPayload, LoginRequest, MeResponse, RefreshRequest, RegisterRequest, TokenResponse,
};
use servicehub_core::{ErrorBody, MessageResponse, Role};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_me,
    ),
    components(
        schemas(
            Role,
            UserProfile,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthPayload,
            TokenResponse,
            MeResponse,
            ErrorBody,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token endpoints")
    ),
    info(
        title = "ServiceHub API",
        version = "0.1.0",
        description = "Customer and service-provider marketplace API with JWT bearer auth.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
