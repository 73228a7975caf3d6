// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed client for the show-tracker API.

use super::ClientError;
use crate::models::{ShowDescriptor, UserProfile};
use serde::Serialize;

/// Show-tracker API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct CreateShowsBody<'a> {
    shows: &'a [ShowDescriptor],
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /users/me`
    pub async fn fetch_me(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(format!("{}/users/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /shows/create`
    pub async fn track_shows(
        &self,
        token: &str,
        shows: &[ShowDescriptor],
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/shows/create", self.base_url))
            .bearer_auth(token)
            .json(&CreateShowsBody { shows })
            .send()
            .await?;

        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    Err(ClientError::Status(status))
}
