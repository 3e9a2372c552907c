mod auth;
mod db;
mod error;
mod models;
mod query;
mod validation;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use validator::Validate;

use auth::{AdminUser, AuthConfig, TokenService};
use error::ApiError;
use models::{CreateWatch, UpdateWatch, Watch};
use query::Pagination;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        list_watches,
        get_watch,
        create_watch,
        update_watch,
        delete_watch,
    ),
    components(
        schemas(Watch, CreateWatch, UpdateWatch)
    ),
    tags(
        (name = "watches", description = "Watch catalog management endpoints")
    ),
    info(
        title = "Luxury Watch E-Commerce API",
        version = "1.0.0",
        description = "Backend for a luxury watch store with JWT authentication",
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
}

/// Handler for GET /
/// Root endpoint, API health check
async fn read_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to Luxury Watch E-Commerce API",
        "docs": "/swagger-ui",
        "status": "operational"
    }))
}

/// Handler for GET /watches
/// Lists the catalog with skip/limit pagination (public endpoint)
#[utoipa::path(
    get,
    path = "/watches",
    params(Pagination),
    responses(
        (status = 200, description = "List of watches", body = Vec<Watch>),
        (status = 500, description = "Internal server error")
    ),
    tag = "watches"
)]
async fn list_watches(
    Query(params): Query<Pagination>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Watch>>, ApiError> {
    let (skip, limit) = params.resolve();
    tracing::debug!("Listing watches: skip={}, limit={}", skip, limit);

    let watches = sqlx::query_as::<_, Watch>(
        r#"
        SELECT id, name, brand, description, price, image_url, stock, created_at
        FROM watches
        ORDER BY id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} watches", watches.len());
    Ok(Json(watches))
}

/// Handler for GET /watches/:id
/// Retrieves a single watch (public endpoint)
#[utoipa::path(
    get,
    path = "/watches/{id}",
    params(
        ("id" = i32, Path, description = "Watch ID")
    ),
    responses(
        (status = 200, description = "Watch found", body = Watch),
        (status = 404, description = "Watch not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "watches"
)]
async fn get_watch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Watch>, ApiError> {
    tracing::debug!("Fetching watch with id: {}", id);

    let watch = sqlx::query_as::<_, Watch>(
        r#"
        SELECT id, name, brand, description, price, image_url, stock, created_at
        FROM watches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "Watch".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(watch))
}

/// Handler for POST /watches
/// Creates a new watch (admin only)
#[utoipa::path(
    post,
    path = "/watches",
    request_body = CreateWatch,
    responses(
        (status = 201, description = "Watch created successfully", body = Watch),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Authenticated but not an admin"),
        (status = 422, description = "Invalid input data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "watches"
)]
async fn create_watch(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateWatch>,
) -> Result<(StatusCode, Json<Watch>), ApiError> {
    tracing::debug!("Admin {} creating watch: {}", admin.username, payload.name);

    payload.validate()?;

    let watch = sqlx::query_as::<_, Watch>(
        r#"
        INSERT INTO watches (name, brand, description, price, image_url, stock)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, brand, description, price, image_url, stock, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.brand)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.image_url)
    .bind(payload.stock)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created watch with id: {}", watch.id);
    Ok((StatusCode::CREATED, Json(watch)))
}

/// Handler for PUT /watches/:id
/// Partially updates a watch (admin only); omitted fields keep their values
#[utoipa::path(
    put,
    path = "/watches/{id}",
    params(
        ("id" = i32, Path, description = "Watch ID")
    ),
    request_body = UpdateWatch,
    responses(
        (status = 200, description = "Watch updated successfully", body = Watch),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Authenticated but not an admin"),
        (status = 404, description = "Watch not found"),
        (status = 422, description = "Invalid input data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "watches"
)]
async fn update_watch(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWatch>,
) -> Result<Json<Watch>, ApiError> {
    tracing::debug!("Admin {} updating watch with id: {}", admin.username, id);

    payload.validate()?;

    // Read-then-write inside one transaction so the coalesced row can't be
    // clobbered by a concurrent update between the fetch and the write
    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, Watch>(
        "SELECT id, name, brand, description, price, image_url, stock, created_at \
         FROM watches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "Watch".to_string(),
        id: id.to_string(),
    })?;

    // Only supplied fields change; everything else keeps its stored value
    let merged = payload.apply_to(existing);
    let updated = sqlx::query_as::<_, Watch>(
        r#"
        UPDATE watches
        SET name = $1,
            brand = $2,
            description = $3,
            price = $4,
            image_url = $5,
            stock = $6
        WHERE id = $7
        RETURNING id, name, brand, description, price, image_url, stock, created_at
        "#,
    )
    .bind(merged.name)
    .bind(merged.brand)
    .bind(merged.description)
    .bind(merged.price)
    .bind(merged.image_url)
    .bind(merged.stock)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Successfully updated watch with id: {}", id);
    Ok(Json(updated))
}

/// Handler for DELETE /watches/:id
/// Removes a watch from the catalog (admin only)
#[utoipa::path(
    delete,
    path = "/watches/{id}",
    params(
        ("id" = i32, Path, description = "Watch ID")
    ),
    responses(
        (status = 204, description = "Watch deleted successfully"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Authenticated but not an admin"),
        (status = 404, description = "Watch not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "watches"
)]
async fn delete_watch(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!("Admin {} deleting watch with id: {}", admin.username, id);

    let result = sqlx::query("DELETE FROM watches WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound {
            resource: "Watch".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Successfully deleted watch with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(db: PgPool, tokens: TokenService) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState { db, tokens };

    // Permissive CORS so the storefront can be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health check
        .route("/", get(read_root))
        // Auth routes
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
        .route("/users/me", get(auth::me_handler))
        // Catalog routes
        .route("/watches", get(list_watches))
        .route("/watches", post(create_watch))
        .route("/watches/:id", get(get_watch))
        .route("/watches/:id", put(update_watch))
        .route("/watches/:id", delete(delete_watch))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Watch API - Starting...");

    // Get configuration from environment variables
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using an insecure development secret");
        "insecure-dev-secret-change-me".to_string()
    });
    let ttl_minutes = std::env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(auth::token::DEFAULT_TTL_MINUTES);
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin123".to_string());

    let tokens = TokenService::new(AuthConfig::new(secret, ttl_minutes));

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Seed the initial admin account and sample catalog if the tables are empty
    db::seed_database(&db_pool, &tokens, &admin_password)
        .await
        .expect("Failed to seed database");

    // Create the application router
    let app = create_router(db_pool, tokens);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Watch API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
