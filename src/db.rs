use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::auth::{AuthService, TokenService, UserRepository};
use crate::error::ApiError;

/// Type alias for the PostgreSQL connection pool
pub type DbPool = PgPool;

/// Creates and configures a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    tracing::debug!("Creating database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Seed the database on startup
///
/// Creates the initial admin account when the users table is empty, and a
/// small sample catalog when the watches table is empty. This is the only
/// path that sets the admin flag; there is no runtime escalation endpoint.
pub async fn seed_database(
    pool: &PgPool,
    tokens: &TokenService,
    admin_password: &str,
) -> Result<(), ApiError> {
    let user_repo = UserRepository::new(pool.clone());

    let has_users = user_repo
        .any_user_exists()
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    if !has_users {
        let service = AuthService::new(UserRepository::new(pool.clone()), tokens.clone());
        service
            .create_account("admin", "admin@luxurywatches.com", admin_password, true)
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        tracing::info!("Seeded initial admin account");
    }

    let has_watches: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM watches)")
        .fetch_one(pool)
        .await?;

    if !has_watches.0 {
        seed_sample_watches(pool).await?;
    }

    Ok(())
}

/// Insert the sample catalog entries
async fn seed_sample_watches(pool: &PgPool) -> Result<(), ApiError> {
    let samples: [(&str, &str, &str, f64, &str, i32); 6] = [
        (
            "Submariner Date",
            "Rolex",
            "The ultimate diving watch. Water-resistant to 300 meters, with a \
             unidirectional rotatable bezel and a self-winding movement with a \
             70-hour power reserve.",
            14300.00,
            "https://images.unsplash.com/photo-1523170335258-f5ed11844a49?w=500",
            3,
        ),
        (
            "Nautilus 5711",
            "Patek Philippe",
            "An icon of luxury sports watches. The elegant octagonal bezel and \
             horizontal embossed dial represent the pinnacle of fine watchmaking.",
            52635.00,
            "https://images.unsplash.com/photo-1594534475808-b18fc33b045e?w=500",
            1,
        ),
        (
            "Speedmaster Professional Moonwatch",
            "Omega",
            "The first watch worn on the moon. This manual-winding chronograph \
             has been flight-qualified by NASA for all manned space missions.",
            6395.00,
            "https://images.unsplash.com/photo-1587836374058-4ec0f0e4b6fb?w=500",
            5,
        ),
        (
            "Calatrava 5196",
            "Patek Philippe",
            "The essence of the classic round watch. Clean lines and understated \
             elegance in a hand-wound dress watch of refined simplicity.",
            28420.00,
            "https://images.unsplash.com/photo-1509048191080-d2984bad6ae5?w=500",
            2,
        ),
        (
            "Daytona",
            "Rolex",
            "A legendary chronograph designed for professional race car drivers, \
             with a tachymetric scale bezel and self-winding movement.",
            34650.00,
            "https://images.unsplash.com/photo-1614164185128-e4ec99c436d7?w=500",
            2,
        ),
        (
            "Seamaster Diver 300M",
            "Omega",
            "Style and technical performance: water-resistant to 300 meters with \
             a helium escape valve and Co-Axial Master Chronometer certification.",
            5400.00,
            "https://images.unsplash.com/photo-1606390658827-aca5e5734971?w=500",
            4,
        ),
    ];

    for (name, brand, description, price, image_url, stock) in samples {
        sqlx::query(
            "INSERT INTO watches (name, brand, description, price, image_url, stock) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(name)
        .bind(brand)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    tracing::info!("Seeded {} sample watches", samples.len());
    Ok(())
}
