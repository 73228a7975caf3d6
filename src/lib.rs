// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Show-Tracker: keep track of which episodes of which shows you've watched
//!
//! This crate provides the backend API (Google sign-in, session tokens,
//! tracked-show storage) and a small client library holding the browser-side
//! session.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use services::{IdentityProvider, IdentityResolver, TokenCodec};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UserStore>,
    pub token_codec: Arc<TokenCodec>,
    pub identity_resolver: IdentityResolver,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wire up the token codec and identity resolver around a store.
    pub fn new(
        config: Config,
        store: Arc<dyn UserStore>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let token_codec = Arc::new(TokenCodec::new(&config.jwt_signing_key, config.token_ttl));
        let identity_resolver = IdentityResolver::new(token_codec.clone(), store.clone());

        Self {
            config,
            store,
            token_codec,
            identity_resolver,
            identity_provider,
        }
    }
}
