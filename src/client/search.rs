// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Show search against the TV listings API.
//!
//! The raw API response is reshaped into the flat records the add-show
//! dialog renders; everything else in it is ignored.

use super::ClientError;
use crate::models::ShowDescriptor;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// One search hit, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSearchResult {
    pub id: u64,
    pub name: String,
    pub image: Option<String>,
    pub premiered: Option<String>,
    pub summary: Option<String>,
}

impl ShowSearchResult {
    /// Descriptor sent to `/shows/create` when the user picks this show.
    pub fn to_descriptor(&self) -> ShowDescriptor {
        ShowDescriptor {
            id: self.id,
            name: Some(self.name.clone()),
            image: self.image.clone(),
        }
    }
}

#[derive(Deserialize)]
struct SearchHit {
    show: RawShow,
}

#[derive(Deserialize)]
struct RawShow {
    id: u64,
    name: String,
    #[serde(default)]
    image: Option<RawImage>,
    #[serde(default)]
    premiered: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(default)]
    medium: Option<String>,
    #[serde(default)]
    original: Option<String>,
}

impl From<SearchHit> for ShowSearchResult {
    fn from(hit: SearchHit) -> Self {
        let show = hit.show;
        Self {
            id: show.id,
            name: show.name,
            image: show.image.and_then(|img| img.medium.or(img.original)),
            premiered: show.premiered,
            summary: show.summary,
        }
    }
}

/// TV listings search client.
#[derive(Clone)]
pub struct ShowSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ShowSearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ShowSearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Search shows by name. A blank query returns no results without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<ShowSearchResult>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(format!("{}/search/shows", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(hits.into_iter().map(ShowSearchResult::from).collect())
    }
}
