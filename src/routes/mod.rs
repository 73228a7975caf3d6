// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod auth;

use crate::config::TokenDelivery;
use crate::middleware::auth::{attach_identity, require_identity};
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from the client URL, plus local dev servers
    // when the token travels in the redirect rather than a cookie
    let web_url = state.config.web_url.clone();
    let delivery = state.config.token_delivery;
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| origin_allowed(origin, &web_url, delivery))
            },
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (identity optional)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes());

    // Protected routes (identity required)
    let protected_routes = api::routes().route_layer(middleware::from_fn(require_identity));

    let mut router = Router::new().merge(public_routes).merge(protected_routes);

    // In deployed mode the API also serves the built client.
    if state.config.token_delivery == TokenDelivery::Cookie {
        if let Some(dir) = &state.config.static_dir {
            tracing::info!(dir = %dir, "Serving static client assets");
            let index = format!("{}/index.html", dir.trim_end_matches('/'));
            router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
        }
    }

    router
        .layer(middleware::from_fn_with_state(state.clone(), attach_identity))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Exact match on the client URL; in development also any port on a
/// loopback host.
fn origin_allowed(origin: &str, web_url: &str, delivery: TokenDelivery) -> bool {
    if origin == web_url {
        return true;
    }
    if delivery != TokenDelivery::QueryParameter {
        return false;
    }

    reqwest::Url::parse(origin).is_ok_and(|url| {
        url.scheme() == "http" && matches!(url.host_str(), Some("localhost" | "127.0.0.1"))
    })
}
