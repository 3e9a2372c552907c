// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Form, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::CurrentUser,
    models::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
    repository::UserRepository,
    service::AuthService,
};
use crate::AppState;

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        UserRepository::new(state.db.clone()),
        state.tokens.clone(),
    )
}

/// Register a new account
/// POST /register
///
/// Field validation failures return 422; a taken username or email
/// returns 400.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    tracing::debug!("Registration attempt for username: {}", request.username);

    request.validate()?;

    let user = auth_service(&state).register(&request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange a username/password pair for a bearer token
/// POST /login (form-encoded, OAuth2 password flow style)
pub async fn login_handler(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    tracing::debug!("Login attempt for username: {}", request.username);

    let token = auth_service(&state)
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(token))
}

/// Return the authenticated account (sans password hash)
/// GET /users/me
pub async fn me_handler(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
