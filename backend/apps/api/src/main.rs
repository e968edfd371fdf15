//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::application::bootstrap::EnsureAdminUseCase;
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use dispatch::{PgDispatchRepository, dispatch_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,dispatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) && env::var("JWT_SECRET").is_err() {
        tracing::warn!("JWT_SECRET not set, using a random secret (tokens die with the process)");
        AuthConfig::with_random_secret()
    } else {
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        let ttl_minutes: u64 = env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        // Pepper is optional; when present it is base64-encoded
        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(b64) => Some(Engine::decode(&general_purpose::STANDARD, &b64)?),
            Err(_) => None,
        };
        AuthConfig {
            token_secret: secret.into_bytes(),
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            password_pepper,
        }
    };

    // Seed the first admin account from environment credentials
    // Errors here should not prevent server startup
    if let (Ok(admin_email), Ok(admin_password)) =
        (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD"))
    {
        let seeder = EnsureAdminUseCase::new(
            Arc::new(PgAuthRepository::new(pool.clone())),
            Arc::new(auth_config.clone()),
        );
        match seeder.execute(&admin_email, &admin_password).await {
            Ok(true) => tracing::info!("Admin account seeded"),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Admin seeding failed, continuing anyway");
            }
        }
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let auth_repo = PgAuthRepository::new(pool.clone());
    let dispatch_repo = PgDispatchRepository::new(pool.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest(
            "/api/auth",
            auth_router(auth_repo.clone(), auth_config.clone()),
        )
        .nest("/api", dispatch_router(dispatch_repo, auth_repo, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
