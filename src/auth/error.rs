// Authentication and authorization error types

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Authentication and authorization failures
///
/// Invalid, expired, and missing tokens, as well as a valid token naming an
/// unknown account, are distinct variants so tests and logs can tell them
/// apart, but they all collapse to the same 401 response: leaking which one
/// occurred would allow account enumeration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Token subject does not match any account")]
    UnknownSubject,
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Admin access required")]
    Forbidden,
    #[error("Username already registered")]
    UsernameTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed")]
    PasswordHash,
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::UnknownSubject
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::PasswordHash
            | AuthError::TokenGeneration(_)
            | AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message, safe to serialize (no internal details)
    fn client_message(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "Request validation failed",
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::UnknownSubject => "Could not validate credentials",
            AuthError::InvalidCredentials => "Incorrect username or password",
            AuthError::Forbidden => "Not enough permissions. Admin access required.",
            AuthError::UsernameTaken => "Username already registered",
            AuthError::EmailTaken => "Email already registered",
            AuthError::PasswordHash
            | AuthError::TokenGeneration(_)
            | AuthError::Database(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Validation(errors) => {
                tracing::debug!("Registration validation failed: {:?}", errors)
            }
            AuthError::MissingToken => warn!("Missing token in request"),
            AuthError::InvalidToken => warn!("Invalid token attempt"),
            AuthError::ExpiredToken => warn!("Expired token attempt"),
            AuthError::UnknownSubject => warn!("Token subject not found"),
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::Forbidden => warn!("Non-admin attempted a privileged operation"),
            AuthError::UsernameTaken | AuthError::EmailTaken => {
                warn!("Registration conflict: {}", self)
            }
            AuthError::PasswordHash
            | AuthError::TokenGeneration(_)
            | AuthError::Database(_) => error!("Auth internal error: {}", self),
        }

        let status = self.status_code();
        // Validation responses carry the per-field rule codes so clients can
        // see which requirement was unmet
        let body = match &self {
            AuthError::Validation(errors) => Json(json!({
                "error": self.client_message(),
                "details": errors,
            })),
            _ => Json(json!({
                "error": self.client_message(),
            })),
        };

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            // Challenge header required by the bearer scheme
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
