// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth sign-in handshake.
//!
//! Each stage is its own type, so a token can only be issued from a
//! received callback and a callback only after the state check:
//!
//! ```text
//! Unauthenticated --begin--> ProviderRedirect
//!     --receive_callback--> CallbackReceived --issue_token--> TokenIssued
//! ```
//!
//! Any failure ends the flow with `AppError::ProviderAuth` (or the store
//! error) and nothing is handed to the client.

use crate::config::TokenDelivery;
use crate::error::{AppError, Result};
use crate::models::{User, UserId};
use crate::services::oauth_state::{sign_state, verify_state};
use crate::AppState;
use std::time::{SystemTime, UNIX_EPOCH};

/// Browser must be sent to the provider.
#[derive(Debug, Clone)]
pub struct ProviderRedirect {
    pub authorization_url: String,
    /// Bound to the browser through the nonce cookie.
    pub nonce: String,
}

/// Provider confirmed the user; the local account exists.
#[derive(Debug, Clone)]
pub struct CallbackReceived {
    pub user: User,
    pub created: bool,
}

/// Token minted for the signed-in user.
#[derive(Debug, Clone)]
pub struct TokenIssued {
    pub user_id: UserId,
    pub token: String,
}

/// Where to send the token, per the configured delivery policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Redirect to this client URL (token in the query string).
    Redirect(String),
    /// Set the token cookie and redirect to the application root.
    Cookie { name: String, token: String },
}

/// Callback query parameters as sent by the provider.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub struct OAuthHandshake<'a> {
    app: &'a AppState,
}

impl<'a> OAuthHandshake<'a> {
    pub fn new(app: &'a AppState) -> Self {
        Self { app }
    }

    /// Unauthenticated → ProviderRedirect.
    pub fn begin(&self) -> Result<ProviderRedirect> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let state = sign_state(&nonce, now_ms()?, &self.app.config.oauth_state_key);

        Ok(ProviderRedirect {
            authorization_url: self.app.identity_provider.authorization_url(&state),
            nonce,
        })
    }

    /// ProviderRedirect → CallbackReceived.
    ///
    /// Verifies the state, exchanges the code and finds or creates the user.
    pub async fn receive_callback(
        &self,
        params: &CallbackParams,
        nonce_cookie: Option<&str>,
    ) -> Result<CallbackReceived> {
        if let Some(error) = &params.error {
            return Err(AppError::ProviderAuth(format!("provider returned error: {}", error)));
        }

        let state = params
            .state
            .as_deref()
            .ok_or_else(|| AppError::ProviderAuth("missing state parameter".to_string()))?;

        verify_state(state, nonce_cookie, now_ms()?, &self.app.config.oauth_state_key)
            .map_err(|e| AppError::ProviderAuth(e.to_string()))?;

        let code = params
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::ProviderAuth("missing authorization code".to_string()))?;

        let profile = self.app.identity_provider.exchange_code(code).await?;

        let (user, created) = self
            .app
            .store
            .find_or_create_by_provider_identity(&profile)
            .await?;

        tracing::info!(
            user_id = %user.id,
            provider = %user.identity.provider,
            created,
            "OAuth callback handled"
        );

        Ok(CallbackReceived { user, created })
    }

    /// CallbackReceived → TokenIssued.
    pub fn issue_token(&self, received: CallbackReceived) -> Result<TokenIssued> {
        let token = self.app.token_codec.encode(&received.user.id)?;
        Ok(TokenIssued {
            user_id: received.user.id,
            token,
        })
    }

    /// How the issued token reaches the client.
    pub fn delivery(&self, issued: TokenIssued) -> Delivery {
        let config = &self.app.config;
        match config.token_delivery {
            TokenDelivery::QueryParameter => Delivery::Redirect(format!(
                "{}/auth/google/callback?token={}",
                config.web_url,
                urlencoding::encode(&issued.token)
            )),
            TokenDelivery::Cookie => Delivery::Cookie {
                name: config.auth_token_key.clone(),
                token: issued.token,
            },
        }
    }
}

fn now_ms() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}
