// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth 2.0 client.
//!
//! Handles:
//! - Building the authorization redirect (scopes `profile email`)
//! - Exchanging the authorization code for an access token
//! - Fetching the signed-in user's profile

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ProviderIdentity, ProviderProfile};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "profile email";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Third-party identity provider used by the OAuth handshake.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL to send the browser to, carrying `state` through the round trip.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the user's profile.
    ///
    /// Every failure maps to `AppError::ProviderAuth`.
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, AppError>;
}

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl GoogleOAuthClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_callback_url(),
            auth_endpoint: AUTH_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
        })
    }

    /// Point the client at different endpoints (tests, emulators).
    pub fn with_endpoints(
        mut self,
        auth_endpoint: impl Into<String>,
        token_endpoint: impl Into<String>,
        userinfo_endpoint: impl Into<String>,
    ) -> Self {
        self.auth_endpoint = auth_endpoint.into();
        self.token_endpoint = token_endpoint.into();
        self.userinfo_endpoint = userinfo_endpoint.into();
        self
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ProviderAuth(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderAuth(format!(
                "Token exchange returned HTTP {}: {}",
                status, body
            )));
        }

        let token: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderAuth(format!("Token response parse error: {}", e)))?;

        Ok(token.access_token)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ProviderAuth(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ProviderAuth(format!(
                "Userinfo returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ProviderAuth(format!("Userinfo parse error: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.auth_endpoint,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, AppError> {
        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_userinfo(&access_token).await?;

        if info.sub.is_empty() {
            return Err(AppError::ProviderAuth("Userinfo missing subject".to_string()));
        }

        let name = info
            .name
            .or_else(|| info.email.clone())
            .unwrap_or_default();

        tracing::debug!(subject = %info.sub, "Fetched Google profile");

        Ok(ProviderProfile {
            identity: ProviderIdentity::google(info.sub),
            name,
            email: info.email,
        })
    }
}

/// Token endpoint response (fields we use).
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

/// OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}
