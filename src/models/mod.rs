// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod show;
pub mod user;

pub use show::{ShowDescriptor, TrackedShow};
pub use user::{ProviderIdentity, ProviderProfile, User, UserId, UserProfile};
