// Request extractors for authenticated and admin-only routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{error::AuthError, models::User, repository::UserRepository};
use crate::AppState;

/// Extracts the bearer token from the Authorization header
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

/// Lets an account through only if it carries the admin flag
fn require_admin(user: User) -> Result<User, AuthError> {
    if !user.is_admin {
        return Err(AuthError::Forbidden);
    }
    Ok(user)
}

/// Authenticated account extractor
///
/// Validates the bearer token and resolves the account named by its
/// subject. Authentication failures and an unknown subject both reject
/// with the same 401 response.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = bearer_token(parts)?;
        let claims = state.tokens.validate(token)?;

        let user = UserRepository::new(state.db.clone())
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        debug!("Authenticated request for account: {}", user.username);
        Ok(CurrentUser(user))
    }
}

/// Admin account extractor
///
/// Authentication is checked first, so an unauthenticated request gets 401
/// and an authenticated non-admin gets 403, never the other way around.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let user = require_admin(user)?;

        debug!("Admin access granted to account: {}", user.username);
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();
        req.into_parts().0
    }

    fn parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();
        req.into_parts().0
    }

    #[test]
    fn test_bearer_token_is_extracted() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_missing_token() {
        let parts = parts_without_auth();
        assert!(matches!(
            bearer_token(&parts).unwrap_err(),
            AuthError::MissingToken
        ));
    }

    #[test]
    fn test_non_bearer_schemes_are_rejected() {
        for auth_value in ["Basic dXNlcjpwYXNz", "token_without_scheme", "bearer lowercase"] {
            let parts = parts_with_auth(auth_value);
            assert!(matches!(
                bearer_token(&parts).unwrap_err(),
                AuthError::InvalidToken
            ));
        }
    }

    fn account(is_admin: bool) -> User {
        User {
            id: 1,
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            is_admin,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_account_passes_the_admin_gate() {
        let user = require_admin(account(true)).unwrap();
        assert_eq!(user.username, "carol");
    }

    #[test]
    fn test_non_admin_account_is_forbidden() {
        assert!(matches!(
            require_admin(account(false)).unwrap_err(),
            AuthError::Forbidden
        ));
    }
}
