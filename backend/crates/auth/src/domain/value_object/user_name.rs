//! User Name Value Object
//!
//! Display name shown on incident reports and messages.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 255;

/// User display name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        let length = name.chars().count();
        if length < NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at least {} characters",
                NAME_MIN_LENGTH
            )));
        }
        if length > NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains control characters"));
        }

        Ok(Self(name))
    }

    /// Create from a trusted database value without re-validation
    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert_eq!(UserName::new("  Ada Lovelace ").unwrap().as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_rejects_too_short() {
        assert!(UserName::new("a").is_err());
        assert!(UserName::new("   ").is_err());
    }

    #[test]
    fn test_rejects_control_chars() {
        assert!(UserName::new("bad\u{0007}name").is_err());
    }
}
