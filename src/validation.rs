// Validation utilities module
// Provides custom validation functions for domain-specific rules

use validator::ValidationError;

/// Validates that a price is strictly positive (for required f64 fields)
pub fn validate_positive_price(price: f64) -> Result<(), ValidationError> {
    if price <= 0.0 {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates password strength requirements
///
/// Rules:
/// - At least 8 characters
/// - At least one uppercase letter
/// - At least one lowercase letter
/// - At least one digit
///
/// Returns the first violated rule as the error code so clients can tell
/// which requirement failed.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("password_needs_uppercase"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::new("password_needs_lowercase"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_needs_digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_zero_is_rejected() {
        assert!(validate_positive_price(0.0).is_err());
    }

    #[test]
    fn test_price_one_cent_is_accepted() {
        assert!(validate_positive_price(0.01).is_ok());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        assert!(validate_positive_price(-5.0).is_err());
    }

    #[test]
    fn test_password_missing_uppercase() {
        let err = validate_password_strength("abcdefg1").unwrap_err();
        assert_eq!(err.code, "password_needs_uppercase");
    }

    #[test]
    fn test_password_valid() {
        assert!(validate_password_strength("Abcdefg1").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password_strength("Short1A").unwrap_err();
        assert_eq!(err.code, "password_too_short");
    }

    #[test]
    fn test_password_missing_lowercase() {
        let err = validate_password_strength("ABCDEFG1").unwrap_err();
        assert_eq!(err.code, "password_needs_lowercase");
    }

    #[test]
    fn test_password_missing_digit() {
        let err = validate_password_strength("Abcdefgh").unwrap_err();
        assert_eq!(err.code, "password_needs_digit");
    }
}
