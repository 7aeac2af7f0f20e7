//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the session endpoints and a health probe under a single Axum
//! router. Every request is wrapped in a `tower_http` trace span.

pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/session/login", post(session::login))
        .route("/api/session/me", get(session::me))
        .route("/api/session/logout", post(session::logout))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
