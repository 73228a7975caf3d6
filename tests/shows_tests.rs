// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Show tracking endpoint tests.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use show_tracker::config::Config;
use show_tracker::db::{MemoryStore, UserStore};
use show_tracker::error::AppError;
use show_tracker::models::{ProviderProfile, ShowDescriptor, User, UserId};
use show_tracker::routes::create_router;
use show_tracker::AppState;
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_track_show_then_visible_in_profile() {
    let (app, _, _) = common::create_test_app();
    let token = common::login(&app, "code-ada").await;

    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": [{"id": 1}]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({"ok": true}));

    let me = common::send(&app, "GET", "/users/me", Some(&token), None).await;
    let body = common::body_json(me).await;
    let ids: Vec<u64> = body["trackedShows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|show| show["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_tracking_same_show_twice_keeps_one_entry() {
    let (app, _, _) = common::create_test_app();
    let token = common::login(&app, "code-ada").await;

    for _ in 0..2 {
        let response = common::send(
            &app,
            "POST",
            "/shows/create",
            Some(&token),
            Some(json!({"shows": [{"id": 82, "name": "Game of Thrones"}, {"id": 5}]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let me = common::send(&app, "GET", "/users/me", Some(&token), None).await;
    let body = common::body_json(me).await;
    let shows = body["trackedShows"].as_array().unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0]["name"], "Game of Thrones");
}

#[tokio::test]
async fn test_track_without_token_writes_nothing() {
    let (app, _, store) = common::create_test_app();
    let token = common::login(&app, "code-ada").await;

    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        None,
        Some(json!({"shows": [{"id": 1}]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let me = common::send(&app, "GET", "/users/me", Some(&token), None).await;
    let body = common::body_json(me).await;
    assert_eq!(body["trackedShows"], json!([]));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_track_empty_list_rejected() {
    let (app, _, _) = common::create_test_app();
    let token = common::login(&app, "code-ada").await;

    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": []})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Store whose writes always fail.
struct ReadOnlyStore {
    inner: MemoryStore,
}

#[async_trait]
impl UserStore for ReadOnlyStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn find_or_create_by_provider_identity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<(User, bool), AppError> {
        self.inner.find_or_create_by_provider_identity(profile).await
    }

    async fn append_shows(
        &self,
        _id: UserId,
        _shows: &[ShowDescriptor],
    ) -> Result<Option<User>, AppError> {
        Err(AppError::Database("write quota exceeded".to_string()))
    }
}

#[tokio::test]
async fn test_write_failure_is_reported() {
    let store = Arc::new(ReadOnlyStore {
        inner: MemoryStore::new(),
    });
    let state = Arc::new(AppState::new(
        Config::test_default(),
        store,
        Arc::new(common::FakeProvider::new()),
    ));
    let app = create_router(state);
    let token = common::login(&app, "code-grace").await;

    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": [{"id": 1}]})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "database_error"})
    );
}

#[tokio::test]
async fn test_track_too_many_shows_rejected() {
    let (app, _, _) = common::create_test_app();
    let token = common::login(&app, "code-ada").await;

    let shows: Vec<_> = (1..=101).map(|id| json!({"id": id})).collect();
    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": shows})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let me = common::send(&app, "GET", "/users/me", Some(&token), None).await;
    assert_eq!(common::body_json(me).await["trackedShows"], json!([]));

    let shows: Vec<_> = (1..=100).map(|id| json!({"id": id})).collect();
    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": shows})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Store whose lookups by ID always fail.
struct UnreachableStore {
    inner: MemoryStore,
}

#[async_trait]
impl UserStore for UnreachableStore {
    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, AppError> {
        Err(AppError::Database("connection reset".to_string()))
    }

    async fn find_or_create_by_provider_identity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<(User, bool), AppError> {
        self.inner.find_or_create_by_provider_identity(profile).await
    }

    async fn append_shows(
        &self,
        id: UserId,
        shows: &[ShowDescriptor],
    ) -> Result<Option<User>, AppError> {
        self.inner.append_shows(id, shows).await
    }
}

#[tokio::test]
async fn test_lookup_failure_leaves_request_anonymous() {
    let inner = MemoryStore::new();
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Arc::new(UnreachableStore {
            inner: inner.clone(),
        }),
        Arc::new(common::FakeProvider::new()),
    ));
    let app = create_router(state);
    let token = common::login(&app, "code-ada").await;

    let me = common::send(&app, "GET", "/users/me", Some(&token), None).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        common::body_json(me).await,
        json!({"error": "unauthorized"})
    );

    let response = common::send(
        &app,
        "POST",
        "/shows/create",
        Some(&token),
        Some(json!({"shows": [{"id": 1}]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(inner.len(), 1);

    let health = common::send(&app, "GET", "/health", Some(&token), None).await;
    assert_eq!(health.status(), StatusCode::OK);
}
