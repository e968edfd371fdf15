//! Register Use Case
//!
//! Creates a user account and issues a first token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    ability::Ability, email::Email, user_name::UserName, user_password::RawPassword,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub ability: Ability,
}

/// Register output
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R: UserRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: RegisterInput,
        now: DateTime<Utc>,
    ) -> AuthResult<RegisterOutput> {
        let name =
            UserName::new(input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email =
            Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw =
            RawPassword::new(input.password).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(name, email, input.role, input.ability);
        let credential = Credential::new(user.user_id, password);

        self.repo.create(&user, &credential).await?;

        let token = TokenIssuer::new(&self.config.token_secret, self.config.token_ttl)
            .issue(&user.user_id, user.role, now)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User registered");

        Ok(RegisterOutput { token, user })
    }
}
