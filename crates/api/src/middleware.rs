use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use byline_auth::TokenValidator;
use byline_store::{User, UserStore};

use crate::app::errors;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenValidator>,
    pub users: Arc<dyn UserStore>,
}

/// Reject the request with 401 unless a valid bearer token names a subject
/// that still exists. Runs before the handler, so authentication failures
/// always come before authorization, lookup, and validation failures.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let user = resolve_user(&state, req.headers()).ok_or_else(|| {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        )
    })?;

    req.extensions_mut().insert(CurrentUser::new(user.principal()));
    Ok(next.run(req).await)
}

/// Attach a principal when a valid bearer token is present; otherwise let the
/// request through anonymously. Invalid and stale tokens degrade to anonymous
/// here instead of failing the request.
pub async fn optional_auth(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = resolve_user(&state, req.headers()) {
        req.extensions_mut().insert(CurrentUser::new(user.principal()));
    }
    next.run(req).await
}

/// Token to principal. The subject is re-read from the store on every
/// request: a role change takes effect on the holder's next call, and a
/// deleted subject's token stops working even inside its validity window.
fn resolve_user(state: &AuthState, headers: &HeaderMap) -> Option<User> {
    let token = extract_bearer(headers)?;
    let claims = state.tokens.validate(token, Utc::now()).ok()?;
    state.users.get(claims.sub)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
