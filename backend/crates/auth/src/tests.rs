//! Integration tests for the auth HTTP surface
//!
//! Uses an in-memory repository and a fixed signing key so the tests
//! run hermetically, no database required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::authenticate::{AuthenticateUseCase, Principal};
use crate::application::config::AuthConfig;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};
use crate::presentation::middleware::{AuthMiddlewareState, require_admin};
use crate::presentation::router::auth_router_generic;

// ============================================================================
// In-Memory Repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<uuid::Uuid, (User, Credential)>>>,
}

impl MemoryUserRepository {
    fn remove(&self, user_id: &UserId) {
        self.users.lock().unwrap().remove(user_id.as_uuid());
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|(u, _)| u.email == user.email)
        {
            return Err(AuthError::EmailTaken);
        }
        users.insert(*user.user_id.as_uuid(), (user.clone(), credential.clone()));
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(user_id.as_uuid())
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|(u, _)| &u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|(u, _)| &u.email == email))
    }

    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(user_id.as_uuid())
            .map(|(_, c)| c.clone()))
    }

    async fn admin_exists(&self) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|(u, _)| u.is_admin()))
    }
}

// ============================================================================
// Test Harness
// ============================================================================

fn test_config() -> AuthConfig {
    AuthConfig {
        token_secret: b"integration-test-secret".to_vec(),
        ..Default::default()
    }
}

/// App with the auth routes plus one admin-gated probe route
fn test_app(repo: MemoryUserRepository) -> Router {
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(repo.clone()),
        config: Arc::new(test_config()),
    };

    let admin_probe = Router::new()
        .route(
            "/admin/ping",
            get(|axum::Extension(p): axum::Extension<Principal>| async move {
                Json(json!({ "admin": p.name }))
            }),
        )
        .route_layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = mw_state.clone();
                async move { require_admin(state, req, next).await }
            },
        ));

    Router::new()
        .nest("/api/auth", auth_router_generic(repo, test_config()))
        .merge(admin_probe)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send_authed(app: &Router, method: &str, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn register_body(email: &str, role: &str) -> Value {
    json!({
        "name": "Test User",
        "email": email,
        "password": "secret1",
        "role": role,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_register_issues_usable_token() {
    let app = test_app(MemoryUserRepository::default());

    let (status, body) =
        send_json(&app, "POST", "/api/auth/register", register_body("a@test.io", "USER")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["email"], "a@test.io");
    assert_eq!(body["user"]["role"], "USER");

    let token = body["access_token"].as_str().unwrap();
    let (status, me) = send_authed(&app, "GET", "/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], body["user"]["id"]);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app(MemoryUserRepository::default());

    let (status, _) =
        send_json(&app, "POST", "/api/auth/register", register_body("dup@test.io", "USER")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) =
        send_json(&app, "POST", "/api/auth/register", register_body("dup@test.io", "USER")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = test_app(MemoryUserRepository::default());

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        json!({ "name": "T U", "email": "w@test.io", "password": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let app = test_app(MemoryUserRepository::default());
    send_json(&app, "POST", "/api/auth/register", register_body("l@test.io", "USER")).await;

    let (wrong_pw, body_a) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({ "email": "l@test.io", "password": "wrong-pw" }),
    )
    .await;
    let (unknown, body_b) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({ "email": "ghost@test.io", "password": "secret1" }),
    )
    .await;

    assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["detail"], body_b["detail"]);
}

#[tokio::test]
async fn test_login_returns_token() {
    let app = test_app(MemoryUserRepository::default());
    send_json(&app, "POST", "/api/auth/register", register_body("ok@test.io", "USER")).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({ "email": "ok@test.io", "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = test_app(MemoryUserRepository::default());

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_authed(&app, "GET", "/api/auth/me", "not.a.token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_route_authentication_precedes_authorization() {
    let app = test_app(MemoryUserRepository::default());

    let (_, user) =
        send_json(&app, "POST", "/api/auth/register", register_body("u@test.io", "USER")).await;
    let (_, admin) =
        send_json(&app, "POST", "/api/auth/register", register_body("a@test.io", "ADMIN")).await;

    // Garbage token on an admin route: 401, never 403
    let (status, _) = send_authed(&app, "GET", "/admin/ping", "garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid user token: authenticated but not authorized
    let user_token = user["access_token"].as_str().unwrap();
    let (status, _) = send_authed(&app, "GET", "/admin/ping", user_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin token passes both steps
    let admin_token = admin["access_token"].as_str().unwrap();
    let (status, body) = send_authed(&app, "GET", "/admin/ping", admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], "Test User");
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let repo = MemoryUserRepository::default();
    let config = Arc::new(test_config());
    let repo_arc = Arc::new(repo.clone());

    let app = test_app(repo.clone());
    let (_, body) =
        send_json(&app, "POST", "/api/auth/register", register_body("gone@test.io", "USER")).await;
    let token = body["access_token"].as_str().unwrap();
    let user_id = UserId::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();

    let use_case = AuthenticateUseCase::new(repo_arc, config);
    assert!(use_case.execute(Some(token), Utc::now()).await.is_ok());

    repo.remove(&user_id);
    assert!(matches!(
        use_case.execute(Some(token), Utc::now()).await,
        Err(AuthError::Unauthenticated)
    ));
}
