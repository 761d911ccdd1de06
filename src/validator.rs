use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use servicehub_core::AppError;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let body = rejection.body_text();
    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        return format!("{field} is required");
    }

    if body.contains("unknown variant") {
        return "Invalid role. Expected 'user' or 'provider'.".to_string();
    }

    if body.contains("invalid type") {
        return "Invalid field type in request".to_string();
    }

    "Invalid request body".to_string()
}

/// `Json<T>` that also runs `T`'s validation rules.
///
/// Malformed bodies are rejected with 400, rule violations with 422; both use
/// the standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection_message(&rejection))))?;

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", format_errors(&errors)),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(email(message = "Please provide a valid email address."))]
        email: String,
        #[validate(length(min = 8))]
        password: String,
    }

    async fn accept(ValidatedJson(_payload): ValidatedJson<Payload>) -> StatusCode {
        StatusCode::OK
    }

    async fn post_json(body: &'static str, content_type: Option<&str>) -> (StatusCode, String) {
        let app = Router::new().route("/", post(accept));
        let mut request = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = json["message"].as_str().unwrap_or_default().to_string();
        (status, message)
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = post_json(
            r#"{"email":"a@example.com","password":"long-enough"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_named() {
        let (status, message) =
            post_json(r#"{"password":"long-enough"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email is required");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let (status, message) = post_json(r#"{"email":"a@b.c"}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_wrong_type() {
        let (status, message) =
            post_json(r#"{"email":5,"password":"long-enough"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid field type in request");
    }

    #[tokio::test]
    async fn test_rule_violation_is_unprocessable() {
        let (status, message) = post_json(
            r#"{"email":"not-an-email","password":"long-enough"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(message, "Please provide a valid email address.");
    }

    #[tokio::test]
    async fn test_rule_without_message_names_field() {
        let (status, message) = post_json(
            r#"{"email":"a@example.com","password":"short"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(message, "password is invalid");
    }
}
