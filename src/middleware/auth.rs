// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication middleware and the route guard.
//!
//! `attach_identity` runs on every request and never rejects anything; it
//! only records who the caller is. `require_identity` is layered onto the
//! protected routes and is the one place that turns "no identity" into 401.

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Resolved identity attached to the request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Pull a token candidate from the `Authorization: Bearer` header, falling
/// back to the auth cookie.
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Attach the caller's `CurrentUser`, if any, and continue.
pub async fn attach_identity(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_token(request.headers(), &jar, &state.config.auth_token_key);

    if let Some(token) = token {
        match state.identity_resolver.resolve(&token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Request authenticated");
                request.extensions_mut().insert(CurrentUser(user));
            }
            Err(AppError::Database(msg)) => {
                tracing::error!(error = %msg, "User lookup failed, continuing unauthenticated");
            }
            Err(err) => {
                tracing::debug!(reason = %err, "Ignoring unusable credentials");
            }
        }
    }

    next.run(request).await
}

/// Reject requests that reached a protected route without an identity.
pub async fn require_identity(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
