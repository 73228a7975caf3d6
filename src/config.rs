// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything here is read once at startup and treated as read-only
//! afterwards, including the token signing secret.

use std::env;
use std::time::Duration;

/// How a freshly minted token reaches the browser after the OAuth callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDelivery {
    /// Redirect to `{web_url}/auth/google/callback?token=...`.
    ///
    /// Used in local development, where the client dev server and this API
    /// listen on different ports and cannot share a cookie.
    QueryParameter,
    /// Set the token as a cookie named `auth_token_key`, then redirect to `/`.
    Cookie,
}

impl TokenDelivery {
    /// Select the delivery policy from the deployment environment name.
    pub fn from_app_env(app_env: &str) -> Self {
        if app_env.eq_ignore_ascii_case("development") {
            TokenDelivery::QueryParameter
        } else {
            TokenDelivery::Cookie
        }
    }
}

/// Which `UserStore` backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Token delivery policy for the OAuth callback
    pub token_delivery: TokenDelivery,
    /// Client application URL (Mode A redirects, CORS)
    pub web_url: String,
    /// Public URL of this API, used for the provider callback URL
    pub api_url: String,
    /// Cookie name carrying the token
    pub auth_token_key: String,
    /// Lifetime of issued tokens; `None` means valid until the secret changes
    pub token_ttl: Option<Duration>,
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Persistence backend
    pub store_backend: StoreBackend,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Directory with the built client, served as the router fallback
    pub static_dir: Option<String>,

    // --- Secrets ---
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
}

const DEFAULT_PORT: u16 = 3005;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let token_ttl = match env::var("TOKEN_TTL_DAYS") {
            Ok(raw) => Some(parse_ttl_days(&raw)?),
            Err(_) => None,
        };

        let store_backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("firestore") => StoreBackend::Firestore,
            Ok("memory") | Err(_) => StoreBackend::Memory,
            Ok(other) => return Err(ConfigError::Invalid("STORE_BACKEND", other.to_string())),
        };

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();

        let oauth_state_key = env::var("OAUTH_STATE_KEY")
            .map(|v| v.into_bytes())
            .unwrap_or_else(|_| jwt_signing_key.clone());

        Ok(Self {
            port,
            token_delivery: TokenDelivery::from_app_env(&app_env),
            web_url: env::var("WEB_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            api_url: env::var("API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            auth_token_key: env::var("AUTH_TOKEN_KEY").unwrap_or_else(|_| "auth_token".to_string()),
            token_ttl,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            store_backend,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            static_dir: env::var("STATIC_DIR").ok().filter(|v| !v.is_empty()),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            jwt_signing_key,
            oauth_state_key,
        })
    }

    /// Deterministic configuration for tests.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            token_delivery: TokenDelivery::QueryParameter,
            web_url: "http://localhost:3000".to_string(),
            api_url: "http://localhost:3005".to_string(),
            auth_token_key: "auth_token".to_string(),
            token_ttl: None,
            google_client_id: "test_client_id".to_string(),
            store_backend: StoreBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            static_dir: None,
            google_client_secret: "test_secret".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            oauth_state_key: b"test_oauth_state_key_32_bytes!!".to_vec(),
        }
    }

    /// Fixed URL the provider redirects back to.
    pub fn google_callback_url(&self) -> String {
        format!("{}/auth/google/callback", self.api_url)
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.web_url.starts_with("https://")
    }
}

/// `TOKEN_TTL_DAYS` as a duration; zero or overflowing values are rejected.
fn parse_ttl_days(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|days| *days > 0)
        .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid("TOKEN_TTL_DAYS", raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
