// Password hashing and verification

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Uses Argon2id with a fresh random salt per hash, so hashing the same
/// password twice yields different PHC strings.
pub struct PasswordService;

impl PasswordService {
    /// Hash a plaintext password into PHC string format
    ///
    /// The output embeds the algorithm, parameters, and salt, so `verify`
    /// needs nothing beyond the stored string.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// Returns false on mismatch and on a malformed stored hash; a corrupt
    /// database row must read as "wrong password", not as a server error.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = PasswordService::hash_password("Correct1Horse").unwrap();
        assert!(PasswordService::verify_password("Correct1Horse", &hash));
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hash = PasswordService::hash_password("Correct1Horse").unwrap();
        assert!(!PasswordService::verify_password("Battery1Staple", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("Correct1Horse").unwrap();
        let second = PasswordService::hash_password("Correct1Horse").unwrap();
        assert_ne!(first, second);
        // Both still verify despite differing salts
        assert!(PasswordService::verify_password("Correct1Horse", &first));
        assert!(PasswordService::verify_password("Correct1Horse", &second));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = PasswordService::hash_password("Correct1Horse").unwrap();
        assert!(!hash.contains("Correct1Horse"));
    }

    #[test]
    fn test_malformed_hash_verifies_false_not_error() {
        assert!(!PasswordService::verify_password("anything", "not-a-phc-string"));
        assert!(!PasswordService::verify_password("anything", ""));
    }
}
