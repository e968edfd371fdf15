//! Authenticate Use Case
//!
//! The access decision for every protected request, in two steps:
//! authentication (bearer token to live user) and authorization (role
//! check). Authentication failures are 401, authorization failures 403,
//! and the steps never swap order: a bad token on an admin route is 401,
//! not 403.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated caller identity, attached to request extensions
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
    pub name: String,
    pub role: UserRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Role a route demands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any authenticated user
    User,
    /// Admin only
    Admin,
}

/// Authorization step: does the principal's role satisfy the requirement?
///
/// The match is exhaustive over both enums so adding a role forces this
/// decision to be revisited.
pub fn require_role(principal: &Principal, required: RequiredRole) -> AuthResult<()> {
    match (required, principal.role) {
        (RequiredRole::User, UserRole::User) => Ok(()),
        (RequiredRole::User, UserRole::Admin) => Ok(()),
        (RequiredRole::Admin, UserRole::Admin) => Ok(()),
        (RequiredRole::Admin, UserRole::User) => Err(AuthError::Forbidden),
    }
}

/// Authenticate use case
pub struct AuthenticateUseCase<R: UserRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve a bearer token to a live user
    ///
    /// The user record is re-read on every request. Role comes from the
    /// database, not the token, so a demotion takes effect on the next
    /// request rather than at token expiry. A token whose subject no
    /// longer exists is rejected.
    pub async fn execute(
        &self,
        bearer: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<Principal> {
        let token = bearer.ok_or(AuthError::Unauthenticated)?;

        let payload = TokenIssuer::new(&self.config.token_secret, self.config.token_ttl)
            .verify(token, now)?;

        let user = self
            .repo
            .find_by_id(&payload.user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %payload.user_id, "Token subject no longer exists");
                AuthError::Unauthenticated
            })?;

        Ok(Principal {
            user_id: user.user_id,
            name: user.name.as_str().to_string(),
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: UserRole) -> Principal {
        Principal {
            user_id: UserId::new(),
            name: "Test".to_string(),
            role,
        }
    }

    #[test]
    fn test_user_routes_accept_both_roles() {
        assert!(require_role(&principal(UserRole::User), RequiredRole::User).is_ok());
        assert!(require_role(&principal(UserRole::Admin), RequiredRole::User).is_ok());
    }

    #[test]
    fn test_admin_routes_reject_plain_users() {
        assert!(matches!(
            require_role(&principal(UserRole::User), RequiredRole::Admin),
            Err(AuthError::Forbidden)
        ));
        assert!(require_role(&principal(UserRole::Admin), RequiredRole::Admin).is_ok());
    }
}
