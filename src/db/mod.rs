// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the user record store and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::{ProviderProfile, ShowDescriptor, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Keyed store of user records.
///
/// The server never caches users across requests; every lookup goes
/// through this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Return the user for this provider identity, creating it on first login.
    ///
    /// Must be atomic: two concurrent calls for the same identity yield the
    /// same record and create it at most once. Returns the user and whether
    /// it was created by this call.
    async fn find_or_create_by_provider_identity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<(User, bool), AppError>;

    /// Add shows to the user's tracking list (set semantics on show ID).
    ///
    /// Returns the updated user, or `None` if the user no longer exists.
    async fn append_shows(
        &self,
        id: UserId,
        shows: &[ShowDescriptor],
    ) -> Result<Option<User>, AppError>;
}

/// Construct the configured store backend.
pub async fn create_store(config: &Config) -> Result<Arc<dyn UserStore>, AppError> {
    match config.store_backend {
        StoreBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
