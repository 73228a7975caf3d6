// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client session store.

use super::{ApiClient, ClientError};
use crate::models::{ShowDescriptor, UserProfile};
use axum_extra::extract::cookie::Cookie;

/// Token and the user profile derived from it.
///
/// Single-writer: owned by the UI event loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl SessionStore {
    /// Session holding a previously persisted token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Pick up the token from the dev-mode callback URL
    /// (`.../auth/google/callback?token=...`).
    pub fn from_callback_url(url: &str) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ClientError::Url(e.to_string()))?;
        let token = parsed
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|t| !t.is_empty());

        Ok(Self { token, user: None })
    }

    /// Pick up the token from a `Cookie` header value (deployed mode).
    pub fn from_cookie_header(header: &str, key: &str) -> Self {
        let token = Cookie::split_parse(header)
            .filter_map(|cookie| cookie.ok())
            .find(|cookie| cookie.name() == key)
            .map(|cookie| cookie.value().to_string())
            .filter(|t| !t.is_empty());

        Self { token, user: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// IDs of the shows the user tracks; empty until the profile is loaded.
    pub fn tracked_show_ids(&self) -> Vec<u64> {
        self.user
            .as_ref()
            .map(|user| user.tracked_shows.iter().map(|show| show.id).collect())
            .unwrap_or_default()
    }

    /// Application mount: load the profile if a token is held.
    ///
    /// Any failure leaves the session logged out.
    pub async fn mount(&mut self, api: &ApiClient) {
        let Some(token) = self.token.clone() else {
            return;
        };

        match api.fetch_me(&token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Session restored");
                self.user = Some(user);
            }
            Err(err) => {
                tracing::info!(error = %err, "Stored token rejected, clearing session");
                self.logout();
            }
        }
    }

    /// Persist a selection of shows, then refresh the profile.
    pub async fn start_tracking(
        &mut self,
        api: &ApiClient,
        shows: &[ShowDescriptor],
    ) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::Unauthorized)?;

        let result = async {
            api.track_shows(&token, shows).await?;
            api.fetch_me(&token).await
        }
        .await;

        match result {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(ClientError::Unauthorized) => {
                self.logout();
                Err(ClientError::Unauthorized)
            }
            Err(err) => Err(err),
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }
}
