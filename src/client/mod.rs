// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side session handling.
//!
//! Holds the token the browser received from the OAuth callback, fetches
//! the simplified profile, and exposes the derived state the UI renders.

pub mod api;
pub mod search;
pub mod session;

pub use api::ApiClient;
pub use search::{ShowSearchClient, ShowSearchResult};
pub use session::SessionStore;

/// Client-side errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(String),
}
