//! Router assembly.
//!
//! Public routes: lead submission, form options, health and the auth
//! endpoints. Admin routes (list, get, update) sit behind the session gate.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::auth::{self, SessionState};
use crate::api::rest::handlers;
use crate::domain::service::Service;

#[must_use]
pub fn router(service: Arc<Service>, sessions: SessionState, body_limit_bytes: usize) -> Router {
    let session_gate = from_fn_with_state(sessions.clone(), auth::require_session);

    Router::new()
        .route(
            "/api/leads",
            post(handlers::create_lead)
                .merge(get(handlers::list_leads).route_layer(session_gate.clone())),
        )
        .route(
            "/api/leads/{id}",
            get(handlers::get_lead)
                .put(handlers::update_lead)
                .route_layer(session_gate),
        )
        .route("/api/auth", post(auth::login).delete(auth::logout))
        .route("/api/form-options", get(handlers::form_options))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(Extension(service))
        .layer(Extension(sessions))
}
