// JWT issuance and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// Default token lifetime in minutes
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Process-wide auth configuration, built once at startup
///
/// Rotating the secret invalidates every outstanding token; that is an
/// operational action, not something the service reconciles at runtime.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

impl AuthConfig {
    pub fn new(secret: String, ttl_minutes: i64) -> Self {
        Self { secret, ttl_minutes }
    }
}

/// JWT claims carried by every access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account's username
    pub sub: String,
    /// Issued-at timestamp (unix seconds)
    pub iat: i64,
    /// Expiry timestamp (unix seconds)
    pub exp: i64,
}

/// Token service: signs and validates bearer tokens (HS256)
///
/// Stateless; output is purely a function of the secret, the subject, and
/// the clock.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Token lifetime as a chrono Duration
    fn ttl(&self) -> Duration {
        Duration::minutes(self.config.ttl_minutes)
    }

    /// Issue a token for the given subject, expiring ttl from now
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token anchored at an explicit instant
    ///
    /// Exists so tests can mint already-expired tokens without sleeping.
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.ttl().num_seconds(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate a token and recover its claims
    ///
    /// Fails with `ExpiredToken` when the expiry is in the past (no leeway)
    /// and `InvalidToken` for a bad signature, malformed payload, or empty
    /// subject.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
