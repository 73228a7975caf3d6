// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use super::show::TrackedShow;

/// Stable user identifier, encoded in the token subject.
pub type UserId = Uuid;

/// Namespace for deriving user IDs from provider identities.
const PROVIDER_IDENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_29a4_5d0e_4b7a_9f3e_0a8d_52c4_e71b);

/// An account at an external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    /// Provider name, e.g. "google"
    pub provider: String,
    /// Provider-assigned subject identifier
    pub subject: String,
}

impl ProviderIdentity {
    pub fn google(subject: impl Into<String>) -> Self {
        Self {
            provider: "google".to_string(),
            subject: subject.into(),
        }
    }

    /// Deterministic user ID for this identity.
    ///
    /// Keying the user record on this ID turns find-or-create into a single
    /// insert-if-absent, so concurrent first logins cannot create duplicates.
    pub fn user_id(&self) -> UserId {
        let name = format!("{}:{}", self.provider, self.subject);
        Uuid::new_v5(&PROVIDER_IDENTITY_NAMESPACE, name.as_bytes())
    }
}

/// Profile data returned by the identity provider after a code exchange.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub identity: ProviderIdentity,
    pub name: String,
    pub email: Option<String>,
}

/// User record stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: UserId,
    /// External identity this account was created from
    pub identity: ProviderIdentity,
    /// Display name
    pub name: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Tracked shows, at most one entry per show ID
    #[serde(default)]
    pub tracked_shows: Vec<TrackedShow>,
    /// When the user first logged in (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Build a fresh record for a first-time login.
    pub fn from_provider_profile(profile: &ProviderProfile) -> Self {
        Self {
            id: profile.identity.user_id(),
            identity: profile.identity.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            tracked_shows: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_tracking(&self, show_id: u64) -> bool {
        self.tracked_shows.iter().any(|show| show.id == show_id)
    }
}

/// Simplified user projection returned to clients.
///
/// Never carries provider identity or anything beyond the user ID itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
    pub tracked_shows: Vec<TrackedShow>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: UserId,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            tracked_shows: user.tracked_shows.clone(),
            id: user.id,
        }
    }
}
