// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory user store for local development and tests.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::show::merge_tracked_shows;
use crate::models::{ProviderProfile, ShowDescriptor, User, UserId};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// User store backed by a concurrent map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Remove a user (account deletion).
    pub fn remove(&self, id: UserId) -> Option<User> {
        self.users.remove(&id).map(|(_, user)| user)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_or_create_by_provider_identity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<(User, bool), AppError> {
        // The entry guard holds the shard lock, so the check and the insert
        // cannot interleave with another caller.
        match self.users.entry(profile.identity.user_id()) {
            Entry::Occupied(entry) => Ok((entry.get().clone(), false)),
            Entry::Vacant(entry) => {
                let user = User::from_provider_profile(profile);
                entry.insert(user.clone());
                Ok((user, true))
            }
        }
    }

    async fn append_shows(
        &self,
        id: UserId,
        shows: &[ShowDescriptor],
    ) -> Result<Option<User>, AppError> {
        let Some(mut entry) = self.users.get_mut(&id) else {
            return Ok(None);
        };
        merge_tracked_shows(&mut entry.tracked_shows, shows);
        Ok(Some(entry.value().clone()))
    }
}
