//! Dispatch Router
//!
//! Routes are grouped by audience: user routes sit behind the bearer
//! gate, admin routes behind the admin gate, and the alert feed is
//! public so the landing page can show active alerts before sign-in.

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgAuthRepository;
use auth::presentation::middleware::{AuthMiddlewareState, require_admin, require_user};

use crate::infra::postgres::PgDispatchRepository;
use crate::presentation::handlers::{self, DispatchAppState, DispatchRepository};

/// Create the Dispatch router with PostgreSQL repositories
pub fn dispatch_router(
    repo: PgDispatchRepository,
    auth_repo: PgAuthRepository,
    config: AuthConfig,
) -> Router {
    dispatch_router_generic(repo, auth_repo, config)
}

/// Create a generic Dispatch router for any repository implementations
pub fn dispatch_router_generic<R, A>(repo: R, auth_repo: A, config: AuthConfig) -> Router
where
    R: DispatchRepository,
    A: UserRepository + Clone + Send + Sync + 'static,
{
    let state = DispatchAppState {
        repo: Arc::new(repo),
    };
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo),
        config: Arc::new(config),
    };

    let user_gate = {
        let mw_state = mw_state.clone();
        axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = mw_state.clone();
                async move { require_user(state, req, next).await }
            },
        )
    };
    let admin_gate = axum::middleware::from_fn(
        move |req: axum::extract::Request, next: axum::middleware::Next| {
            let state = mw_state.clone();
            async move { require_admin(state, req, next).await }
        },
    );

    let incidents = Router::new()
        .route("/", post(handlers::create_incident::<R>))
        .route("/user", get(handlers::get_my_incidents::<R>))
        .route("/{incident_id}", get(handlers::get_incident::<R>));

    let sos = Router::new()
        .route("/", post(handlers::create_sos::<R>))
        .route("/user", get(handlers::get_my_sos::<R>));

    let messages = Router::new()
        .route(
            "/",
            post(handlers::send_message::<R>).get(handlers::get_my_messages::<R>),
        )
        .route("/sos", post(handlers::send_sos_message::<R>))
        .route("/incident", post(handlers::send_incident_message::<R>))
        .route("/{message_id}", get(handlers::get_message::<R>))
        .route("/{message_id}/read", post(handlers::mark_message_read::<R>));

    let user_routes = Router::new()
        .nest("/incidents", incidents)
        .nest("/sos", sos)
        .nest("/messages", messages)
        .route_layer(user_gate);

    // Static /admin segments take precedence over the {message_id}
    // capture, so these can share the /messages prefix with user routes
    let admin_messages = Router::new()
        .route("/admin/all", get(handlers::admin_all_messages::<R>))
        .route("/admin/stats", get(handlers::admin_message_stats::<R>))
        .route(
            "/admin/unread/count",
            get(handlers::admin_unread_count::<R>),
        )
        .route(
            "/admin/{message_id}/read",
            post(handlers::admin_mark_message_read::<R>),
        );

    let admin = Router::new()
        .route("/incidents", get(handlers::admin_list_incidents::<R>))
        .route(
            "/incidents/{incident_id}",
            patch(handlers::admin_update_incident::<R>),
        )
        .route(
            "/incidents/{incident_id}/verify",
            patch(handlers::admin_verify_incident::<R>),
        )
        .route(
            "/incidents/{incident_id}/resolve",
            patch(handlers::admin_resolve_incident::<R>),
        )
        .route("/alerts", post(handlers::create_alert::<R>));

    let admin_routes = Router::new()
        .nest("/messages", admin_messages)
        .nest("/admin", admin)
        .route_layer(admin_gate);

    Router::new()
        .route("/alerts", get(handlers::list_alerts::<R>))
        .merge(user_routes)
        .merge(admin_routes)
        .with_state(state)
}
