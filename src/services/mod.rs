// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google_oauth;
pub mod handshake;
pub mod identity;
pub mod oauth_state;
pub mod token;

pub use google_oauth::{GoogleOAuthClient, IdentityProvider};
pub use handshake::OAuthHandshake;
pub use identity::IdentityResolver;
pub use token::TokenCodec;
