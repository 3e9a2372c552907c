// Authentication service - business logic layer

use tracing::info;

use crate::auth::{
    error::AuthError,
    models::{RegisterRequest, TokenResponse, UserResponse},
    password::PasswordService,
    repository::{UserRepository, UserStore},
    token::TokenService,
};

/// Authentication service coordinating registration and login
pub struct AuthService<S: UserStore = UserRepository> {
    user_repo: S,
    token_service: TokenService,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(user_repo: S, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new account
    ///
    /// The request is assumed to be field-validated already; this layer
    /// enforces uniqueness, hashes the password, and inserts the row. No
    /// write happens if either uniqueness check fails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, AuthError> {
        self.create_account(&request.username, &request.email, &request.password, false)
            .await
    }

    /// Create an account with an explicit admin flag
    ///
    /// The admin variant is reachable only from the startup seed; there is
    /// no endpoint that sets the flag.
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<UserResponse, AuthError> {
        if self.user_repo.username_exists(username).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.user_repo.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = PasswordService::hash_password(password)?;
        let user = self
            .user_repo
            .create_user(username, email, &password_hash, is_admin)
            .await?;

        info!("Registered new account: {}", user.username);
        Ok(UserResponse::from(user))
    }

    /// Authenticate a username/password pair and issue a bearer token
    ///
    /// Unknown username and wrong password both surface as the same
    /// InvalidCredentials outcome.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(&user.username)?;
        info!("Issued token for account: {}", user.username);
        Ok(TokenResponse::bearer(access_token))
    }
}
