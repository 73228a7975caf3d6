// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::config::{Config, TokenDelivery};
use crate::error::Result;
use crate::services::handshake::{CallbackParams, Delivery, OAuthHandshake};
use crate::AppState;

/// Cookie binding the OAuth state to the browser that started the flow.
pub const OAUTH_NONCE_COOKIE: &str = "oauth_nonce";
const CALLBACK_PATH: &str = "/auth/google/callback";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route(CALLBACK_PATH, get(auth_callback))
        .route("/auth/logout", get(logout))
}

/// Start OAuth flow - redirect to Google.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let redirect = OAuthHandshake::new(&state).begin()?;

    let nonce_cookie = Cookie::build((OAUTH_NONCE_COOKIE, redirect.nonce))
        .path(CALLBACK_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.api_url.starts_with("https://"))
        .max_age(time::Duration::minutes(10));

    tracing::info!("Starting OAuth flow, redirecting to Google");

    Ok((
        jar.add(nonce_cookie),
        Redirect::temporary(&redirect.authorization_url),
    ))
}

/// OAuth callback - exchange code, find or create the user, hand out a token.
///
/// The nonce cookie is single-use: it is cleared whether or not the
/// callback succeeds.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let nonce = jar.get(OAUTH_NONCE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(nonce_removal_cookie(&state.config));

    let delivery = match complete_login(&state, &params, nonce.as_deref()).await {
        Ok(delivery) => delivery,
        Err(err) => return (jar, err).into_response(),
    };

    match delivery {
        Delivery::Redirect(url) => (jar, Redirect::temporary(&url)).into_response(),
        Delivery::Cookie { name, token } => {
            let cookie = token_cookie(&state.config, name, token);
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
    }
}

async fn complete_login(
    state: &AppState,
    params: &CallbackParams,
    nonce: Option<&str>,
) -> Result<Delivery> {
    let handshake = OAuthHandshake::new(state);
    let received = handshake.receive_callback(params, nonce).await?;
    let issued = handshake.issue_token(received)?;
    Ok(handshake.delivery(issued))
}

/// Logout - clear the token cookie and go back to the client.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let config = &state.config;
    let removal = token_cookie(config, config.auth_token_key.clone(), String::new());

    let target = match config.token_delivery {
        TokenDelivery::QueryParameter => config.web_url.clone(),
        TokenDelivery::Cookie => "/".to_string(),
    };

    (jar.remove(removal), Redirect::to(&target))
}

/// Token cookie. Readable by client scripts, which copy it into the
/// `Authorization` header.
fn token_cookie(config: &Config, name: String, token: String) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .build()
}

fn nonce_removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((OAUTH_NONCE_COOKIE, ""))
        .path(CALLBACK_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.api_url.starts_with("https://"))
        .build()
}
