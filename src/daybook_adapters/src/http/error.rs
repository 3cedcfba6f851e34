use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use daybook_core::{AuthResponseBuilder, FieldErrors, UserStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::authentication::SessionAuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input")]
    InvalidInput(FieldErrors),

    #[error("Malformed request body")]
    MalformedBody(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid or expired OAuth state")]
    InvalidOAuthState,

    #[error("Federated signin failed: {0}")]
    FederatedSigninFailed(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::InvalidInput(_)
            | AuthApiError::MalformedBody(_)
            | AuthApiError::InvalidOAuthState => StatusCode::BAD_REQUEST,
            AuthApiError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthApiError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            AuthApiError::FederatedSigninFailed(_) => StatusCode::BAD_GATEWAY,
            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Unexpected failures are logged here and reported
    /// without detail.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AuthApiError::InvalidInput(fields) => ErrorResponse {
                error: self.to_string(),
                fields: Some(fields.clone()),
            },
            AuthApiError::UnexpectedError(detail) | AuthApiError::FederatedSigninFailed(detail) => {
                tracing::error!(error = %detail, "request failed");
                ErrorResponse {
                    error: "Something went wrong".to_string(),
                    fields: None,
                }
            }
            _ => ErrorResponse {
                error: self.to_string(),
                fields: None,
            },
        }
    }

    /// Render through a framework-agnostic builder.
    pub fn respond<B: AuthResponseBuilder>(&self, builder: B) -> B::Response {
        let body = serde_json::to_value(self.to_error_response())
            .unwrap_or_else(|_| serde_json::json!({ "error": "Something went wrong" }));
        builder
            .status(self.status_code().as_u16())
            .json_body(body)
            .build()
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

impl From<FieldErrors> for AuthApiError {
    fn from(errors: FieldErrors) -> Self {
        AuthApiError::InvalidInput(errors)
    }
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        AuthApiError::MalformedBody(rejection.body_text())
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AuthApiError::EmailAlreadyRegistered,
            UserStoreError::UserNotFound => AuthApiError::InvalidCredentials,
            UserStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<SessionAuthError> for AuthApiError {
    fn from(error: SessionAuthError) -> Self {
        match error {
            SessionAuthError::Validation(fields) => fields.into(),
            SessionAuthError::InvalidCredentials => AuthApiError::InvalidCredentials,
            SessionAuthError::UserStoreError(e) => e.into(),
            SessionAuthError::UnknownProvider(id) => AuthApiError::UnknownProvider(id),
            SessionAuthError::OAuthStateError(_) => AuthApiError::InvalidOAuthState,
            SessionAuthError::FederatedError(e) => {
                AuthApiError::FederatedSigninFailed(e.to_string())
            }
            SessionAuthError::PasswordHashError(_)
            | SessionAuthError::TokenError(_)
            | SessionAuthError::RevokedSessionStoreError(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::OAuthError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthApiError::from(SessionAuthError::InvalidCredentials), 401),
            (
                AuthApiError::from(SessionAuthError::UserStoreError(
                    UserStoreError::UserAlreadyExists,
                )),
                409,
            ),
            (
                AuthApiError::from(SessionAuthError::Validation(FieldErrors::default())),
                400,
            ),
            (
                AuthApiError::from(SessionAuthError::OAuthStateError(OAuthError::UnknownState)),
                400,
            ),
            (
                AuthApiError::from(SessionAuthError::UnknownProvider("x".into())),
                404,
            ),
            (
                AuthApiError::from(SessionAuthError::UserStoreError(
                    UserStoreError::UnexpectedError("db down".into()),
                )),
                500,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code().as_u16(), status, "{error}");
        }
    }

    #[tokio::test]
    async fn test_json_rejection_becomes_a_json_bad_request() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let rejection = Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();

        let error = AuthApiError::from(rejection);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_error_response().error, "Malformed request body");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_duplicate_message() {
        let error = AuthApiError::from(UserStoreError::UserAlreadyExists);
        assert_eq!(error.to_error_response().error, "Email already registered");
    }

    #[test]
    fn test_unexpected_detail_is_hidden() {
        let error = AuthApiError::UnexpectedError("connection refused".into());
        let body = error.to_error_response();
        assert_eq!(body.error, "Something went wrong");
        assert!(body.fields.is_none());
    }

    #[test]
    fn test_invalid_input_carries_fields() {
        let fields = FieldErrors {
            email: vec!["Invalid email address".into()],
            password: vec![],
        };
        let body = AuthApiError::InvalidInput(fields.clone()).to_error_response();
        assert_eq!(body.error, "Invalid input");
        assert_eq!(body.fields, Some(fields));
    }
}
