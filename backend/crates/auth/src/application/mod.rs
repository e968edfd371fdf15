//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod bootstrap;
pub mod config;
pub mod current_user;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use authenticate::{AuthenticateUseCase, Principal, RequiredRole, require_role};
pub use bootstrap::EnsureAdminUseCase;
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{TokenClaims, TokenError, TokenIssuer};
