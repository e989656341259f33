//! Admin sign-in, sign-out and the session gate in front of admin routes.
//!
//! Credential checks are delegated to a [`SessionProvider`]; this layer only
//! moves the session token between the provider and the `auth-token` cookie.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;
use thiserror::Error;

use crate::api::rest::dto::{LoginRequest, LoginResponse};
use crate::config::AuthConfig;
use crate::domain::ports::SessionProvider;

pub const SESSION_COOKIE: &str = "auth-token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid request")]
    InvalidRequest,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::MissingCredentials | AuthError::InvalidRequest => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Shared by the auth handlers and the session middleware.
#[derive(Clone)]
pub struct SessionState {
    provider: Arc<dyn SessionProvider>,
    enabled: bool,
    secure_cookie: bool,
    max_age_secs: u64,
}

impl SessionState {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>, config: &AuthConfig) -> Self {
        Self {
            provider,
            enabled: config.enabled,
            secure_cookie: config.secure_cookie,
            max_age_secs: config.session_ttl_secs,
        }
    }

    fn cookie(&self, value: &str, max_age_secs: u64) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{SESSION_COOKIE}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }
}

/// Value of the session cookie, if the request carries one.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|token| !token.is_empty())
}

/// `POST /api/auth`
///
/// # Errors
/// 400 for an unreadable body or missing fields, 401 for rejected credentials.
pub async fn login(
    Extension(state): Extension<SessionState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable login body");
        AuthError::InvalidRequest
    })?;

    let (Some(username), Some(password)) = (
        request.username.filter(|u| !u.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AuthError::MissingCredentials);
    };

    let token = state
        .provider
        .login(&username, &password)
        .ok_or(AuthError::InvalidCredentials)?;

    let mut response = Json(LoginResponse {
        success: true,
        user: username,
    })
    .into_response();
    if let Some(cookie) = state.cookie(&token, state.max_age_secs) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

/// `DELETE /api/auth`
pub async fn logout(Extension(state): Extension<SessionState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.provider.logout(token);
    }

    let mut response = Json(json!({ "success": true })).into_response();
    if let Some(cookie) = state.cookie("", 0) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

/// Rejects admin requests without a live session. A no-op when auth is disabled.
///
/// # Errors
/// [`AuthError::Unauthenticated`] for a missing, unknown or expired session.
pub async fn require_session(
    State(state): State<SessionState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.enabled {
        return Ok(next.run(req).await);
    }

    let authorized =
        session_token(req.headers()).is_some_and(|token| state.provider.is_valid(token));
    if authorized {
        return Ok(next.run(req).await);
    }

    tracing::warn!(
        method = %req.method(),
        path = %req.uri().path(),
        "Rejected request without a valid session"
    );
    Err(AuthError::Unauthenticated)
}
