use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use servicehub::modules::accounts::InMemoryAccountStore;
use servicehub::router::init_router;
use servicehub::servicehub_auth::JwtConfig;
use servicehub::servicehub_config::CorsConfig;
use servicehub::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub fn test_state() -> AppState {
    AppState::new(
        &JwtConfig::new(TEST_SECRET),
        CorsConfig::from_lookup(|_| None),
        Arc::new(InMemoryAccountStore::new()),
    )
}

#[allow(dead_code)]
pub fn setup_test_app() -> Router {
    init_router(test_state())
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Registers a fresh account through the API and returns its tokens.
/// `role` is the wire name (`"user"` or `"provider"`); `None` omits the field.
#[allow(dead_code)]
pub async fn register_user(app: &Router, role: Option<&str>) -> TestUser {
    let name: String = Name().fake();
    let email = generate_unique_email();
    let password = "testpass123".to_string();

    let mut payload = json!({
        "name": name,
        "email": email,
        "password": password,
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }

    let (status, body) = send(app, "POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let data = &body["data"];
    TestUser {
        id: data["user"]["id"].as_str().unwrap().to_string(),
        name,
        email,
        password,
        access_token: data["accessToken"].as_str().unwrap().to_string(),
        refresh_token: data["refreshToken"].as_str().unwrap().to_string(),
    }
}
