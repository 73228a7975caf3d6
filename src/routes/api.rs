// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{ShowDescriptor, UserProfile};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upper bound on shows accepted in one request.
const MAX_SHOWS_PER_REQUEST: usize = 100;

/// API routes (require an identity).
/// The guard is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/shows/create", post(create_shows))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

// ─── Show Tracking ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateShowsRequest {
    pub shows: Vec<ShowDescriptor>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OkResponse {
    pub ok: bool,
}

/// Start tracking shows. Already-tracked shows are left as they are.
async fn create_shows(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreateShowsRequest>,
) -> Result<Json<OkResponse>> {
    if body.shows.is_empty() {
        return Err(AppError::BadRequest("no shows given".to_string()));
    }
    if body.shows.len() > MAX_SHOWS_PER_REQUEST {
        return Err(AppError::BadRequest(format!(
            "at most {} shows per request",
            MAX_SHOWS_PER_REQUEST
        )));
    }

    // Write failures propagate as 500 rather than being acknowledged.
    let updated = state.store.append_shows(user.id, &body.shows).await?;

    if updated.is_none() {
        tracing::warn!(user_id = %user.id, "User disappeared before show update");
        return Err(AppError::UserNotFound);
    }

    tracing::info!(
        user_id = %user.id,
        requested = body.shows.len(),
        "Shows tracked"
    );

    Ok(Json(OkResponse { ok: true }))
}
