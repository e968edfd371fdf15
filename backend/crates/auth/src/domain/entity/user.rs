//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    ability::Ability, email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// User entity
///
/// Contains public user profile information.
/// The password digest lives in the Credential entity.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name (shown on reports and messages)
    pub name: UserName,
    /// Login email (unique, normalized lowercase)
    pub email: Email,
    /// Role (User, Admin)
    pub role: UserRole,
    /// Declared accessibility profile
    pub ability: Ability,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(name: UserName, email: Email, role: UserRole, ability: Ability) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            role,
            ability,
            created_at: Utc::now(),
        }
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: UserRole) -> User {
        User::new(
            UserName::new("Test User").unwrap(),
            Email::new("test@example.com").unwrap(),
            role,
            Ability::default(),
        )
    }

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = sample(UserRole::User);
        let b = sample(UserRole::User);
        assert_ne!(a.user_id, b.user_id);
    }

    #[test]
    fn test_is_admin() {
        assert!(!sample(UserRole::User).is_admin());
        assert!(sample(UserRole::Admin).is_admin());
    }
}
