// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use show_tracker::config::{Config, TokenDelivery};
use show_tracker::db::MemoryStore;
use show_tracker::error::AppError;
use show_tracker::models::{ProviderIdentity, ProviderProfile};
use show_tracker::routes::create_router;
use show_tracker::services::IdentityProvider;
use show_tracker::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Identity provider that knows a fixed set of authorization codes.
pub struct FakeProvider {
    profiles: HashMap<String, ProviderProfile>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "code-ada".to_string(),
            ProviderProfile {
                identity: ProviderIdentity::google("google-ada"),
                name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        );
        profiles.insert(
            "code-grace".to_string(),
            ProviderProfile {
                identity: ProviderIdentity::google("google-grace"),
                name: "Grace Hopper".to_string(),
                email: Some("grace@example.com".to_string()),
            },
        );
        Self { profiles }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "https://provider.test/authorize?scope=profile%20email&state={}",
            state
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, AppError> {
        self.profiles
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::ProviderAuth(format!("unknown code {code}")))
    }
}

/// Create a test app around an in-memory store.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_delivery(
    delivery: TokenDelivery,
) -> (axum::Router, Arc<AppState>, MemoryStore) {
    let mut config = Config::test_default();
    config.token_delivery = delivery;
    create_test_app_with_config(config)
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let state = Arc::new(AppState::new(
        config,
        Arc::new(store.clone()),
        Arc::new(FakeProvider::new()),
    ));

    (create_router(state.clone()), state, store)
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
}

/// `name=value` part of a Set-Cookie header.
#[allow(dead_code)]
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

#[allow(dead_code)]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Start the flow; returns the signed state and the nonce cookie pair.
#[allow(dead_code)]
pub async fn begin_login(app: &axum::Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let url = reqwest::Url::parse(&location(&response)).unwrap();
    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .expect("state parameter in provider redirect");

    let cookies = set_cookie_headers(&response);
    let nonce = find_cookie(&cookies, "oauth_nonce").expect("nonce cookie");

    (state, cookie_pair(&nonce))
}

/// Send the provider callback for `code` with the given state and cookie.
#[allow(dead_code)]
pub async fn callback(app: &axum::Router, code: &str, state: &str, cookie: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/auth/google/callback?code={}&state={}",
                    code,
                    urlencoding::encode(state)
                ))
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Run a whole successful login and return the issued token (dev mode).
#[allow(dead_code)]
pub async fn login(app: &axum::Router, code: &str) -> String {
    let (state, nonce) = begin_login(app).await;
    let response = callback(app, code, &state, &nonce).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let url = reqwest::Url::parse(&location(&response)).unwrap();
    url.query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .expect("token in client redirect")
}

/// Issue a request with an optional bearer token.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
