//! Credential Entity
//!
//! Sensitive authentication data, kept separate from the User profile.

use crate::domain::value_object::{user_id::UserId, user_password::UserPassword};

/// Stored login credential
#[derive(Debug, Clone)]
pub struct Credential {
    /// Owning user
    pub user_id: UserId,
    /// Argon2id password digest
    pub password: UserPassword,
}

impl Credential {
    /// Create a credential for a user
    pub fn new(user_id: UserId, password: UserPassword) -> Self {
        Self { user_id, password }
    }
}
