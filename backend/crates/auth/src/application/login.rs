//! Login Use Case
//!
//! Authenticates an email/password pair and issues a token.
//!
//! Unknown email and wrong password produce the same error, so the
//! response does not reveal which part was wrong.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R: UserRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput, now: DateTime<Utc>) -> AuthResult<LoginOutput> {
        // Inputs that fail validation can never match a stored account
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw = RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A user row without a credential row is data corruption
        let credential = self
            .repo
            .find_credential(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential not found".to_string()))?;

        if !credential.password.verify(&raw, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenIssuer::new(&self.config.token_secret, self.config.token_ttl)
            .issue(&user.user_id, user.role, now)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
