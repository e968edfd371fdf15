//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Raw passwords are validated
//! and zeroized on drop; stored digests are opaque PHC strings.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Validation Rules
    /// - Minimum 6 characters, maximum 72 bytes
    /// - Not empty or whitespace-only
    /// - No control characters
    /// - Unicode NFKC normalized
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} bytes (got {})",
                max, actual
            ))
            .with_action("Choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty").with_action("Enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Remove any control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Create without policy checks (test fixtures only)
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

// Never expose the raw password, even in debug output
impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(REDACTED)")
    }
}

/// Hashed password digest (Argon2id PHC string)
#[derive(Clone)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Parse a digest loaded from storage
    ///
    /// Fails if the value is not a well-formed PHC string. Callers decide
    /// how to surface that (a stored digest that fails here is data
    /// corruption, not a client error).
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(s).map(Self)
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this digest (constant-time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Check whether the digest was produced with outdated parameters
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword(REDACTED)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("secret2".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_policy_errors_are_bad_request() {
        let err = RawPassword::new("a".to_string()).unwrap_err();
        assert_eq!(err.kind(), kernel::error::kind::ErrorKind::BadRequest);
    }

    #[test]
    fn test_corrupt_digest_rejected() {
        assert!(UserPassword::from_phc_string("not-a-phc-string").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        assert_eq!(format!("{:?}", raw), "RawPassword(REDACTED)");
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains('$'));
    }
}
