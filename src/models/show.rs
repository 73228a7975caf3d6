// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracked show model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Show selected by the client for tracking (request body element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDescriptor {
    /// TV listings show ID
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A show on a user's tracking list with its watched episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrackedShow {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: Option<String>,
    pub image: Option<String>,
    /// Episode IDs marked as watched
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number[]"))]
    pub seen_episode_ids: BTreeSet<u64>,
}

impl From<&ShowDescriptor> for TrackedShow {
    fn from(show: &ShowDescriptor) -> Self {
        Self {
            id: show.id,
            name: show.name.clone(),
            image: show.image.clone(),
            seen_episode_ids: BTreeSet::new(),
        }
    }
}

/// Merge `shows` into `tracked`, skipping IDs already present.
///
/// Existing entries (and their watched markers) are left untouched.
/// Returns the number of shows added.
pub fn merge_tracked_shows(tracked: &mut Vec<TrackedShow>, shows: &[ShowDescriptor]) -> usize {
    let mut added = 0;
    for show in shows {
        if tracked.iter().any(|existing| existing.id == show.id) {
            continue;
        }
        tracked.push(TrackedShow::from(show));
        added += 1;
    }
    added
}
