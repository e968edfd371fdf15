//! Current User Use Case
//!
//! Loads the full profile for an already-authenticated principal.

use std::sync::Arc;

use crate::application::authenticate::Principal;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> CurrentUserUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal) -> AuthResult<User> {
        // The account can disappear between middleware and handler
        self.repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
