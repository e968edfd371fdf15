//! Admin Bootstrap Use Case
//!
//! Seeds the first admin account from environment credentials at startup.
//! Idempotent: if any admin already exists, nothing happens.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    ability::Ability, email::Email, user_name::UserName, user_password::RawPassword,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Ensure-admin use case
pub struct EnsureAdminUseCase<R: UserRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> EnsureAdminUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Create the seed admin if no admin exists yet
    ///
    /// Returns `true` if an account was created.
    pub async fn execute(&self, email: &str, password: &str) -> AuthResult<bool> {
        if self.repo.admin_exists().await? {
            tracing::debug!("Admin account already present, skipping seed");
            return Ok(false);
        }

        let name = UserName::new("Administrator")
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let email =
            Email::new(email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw = RawPassword::new(password.to_string())
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            // The seed email is taken by a non-admin account; refuse to
            // escalate it silently.
            return Err(AuthError::EmailTaken);
        }

        let hashed = UserPassword::from_raw(&raw, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(name, email, UserRole::Admin, Ability::None);
        let credential = Credential::new(user.user_id, hashed);
        self.repo.create(&user, &credential).await?;

        tracing::info!(user_id = %user.user_id, "Seed admin account created");
        Ok(true)
    }
}
