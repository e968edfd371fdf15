//! Auth Middleware
//!
//! Middleware for requiring authentication (and optionally the admin
//! role) on protected routes. On success the resolved `Principal` is
//! inserted into request extensions for downstream handlers.

use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use std::sync::Arc;

use crate::application::authenticate::{AuthenticateUseCase, RequiredRole, require_role};
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// A missing, non-UTF-8 or non-Bearer header all count as "no token".
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires an authenticated user
pub async fn require_user<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let principal = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Middleware that requires an authenticated admin
///
/// Authentication runs first: a bad token is 401 even on admin routes,
/// 403 is reserved for authenticated non-admins.
pub async fn require_admin<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let principal = authenticate(&state, req.headers()).await?;
    require_role(&principal, RequiredRole::Admin)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

async fn authenticate<R>(
    state: &AuthMiddlewareState<R>,
    headers: &HeaderMap,
) -> Result<crate::application::Principal, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(bearer_token(headers), Utc::now()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_or_malformed_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("bearer abc")), None);
    }
}
