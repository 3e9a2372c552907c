// Account data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Account database model
///
/// Handlers never serialize this directly: responses go through
/// `UserResponse`, which carries no password hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Account response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "crate::validation::validate_password_strength")]
    pub password: String,
}

/// Login request DTO (form-encoded, OAuth2 password flow style)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token response DTO
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(register("alice", "alice@example.com", "Abcdefg1").validate().is_ok());
    }

    #[test]
    fn test_short_username_fails() {
        assert!(register("al", "alice@example.com", "Abcdefg1").validate().is_err());
    }

    #[test]
    fn test_invalid_email_fails() {
        assert!(register("alice", "not-an-email", "Abcdefg1").validate().is_err());
    }

    #[test]
    fn test_weak_password_fails() {
        assert!(register("alice", "alice@example.com", "abcdefg1").validate().is_err());
    }

    #[test]
    fn test_all_violations_are_collected() {
        let errors = register("al", "not-an-email", "weak")
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_user_response_has_no_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"is_admin\":false"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_string(&TokenResponse::bearer("abc123".to_string())).unwrap();
        assert!(json.contains("\"access_token\":\"abc123\""));
        assert!(json.contains("\"token_type\":\"bearer\""));
    }
}
