// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolves session tokens to user records.

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::token::TokenCodec;
use std::sync::Arc;

/// Token → user lookup. Read-only.
#[derive(Clone)]
pub struct IdentityResolver {
    codec: Arc<TokenCodec>,
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn UserStore>) -> Self {
        Self { codec, store }
    }

    /// Resolve a token to the user it was issued for.
    ///
    /// Errors: `InvalidToken` if the token does not verify, `UserNotFound`
    /// if the account no longer exists, `Database` if the lookup fails.
    pub async fn resolve(&self, token: &str) -> Result<User> {
        let user_id = self.codec.decode(token)?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{ProviderIdentity, ProviderProfile};

    fn setup() -> (IdentityResolver, Arc<TokenCodec>, MemoryStore) {
        let codec = Arc::new(TokenCodec::new(b"test_signing_key_32_bytes_long!!", None));
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(codec.clone(), Arc::new(store.clone()));
        (resolver, codec, store)
    }

    #[tokio::test]
    async fn test_resolve_existing_user() {
        let (resolver, codec, store) = setup();
        let (user, _) = store
            .find_or_create_by_provider_identity(&ProviderProfile {
                identity: ProviderIdentity::google("sub-1"),
                name: "Ada".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let token = codec.encode(&user.id).unwrap();
        let resolved = resolver.resolve(&token).await.unwrap();
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn test_resolve_deleted_user() {
        let (resolver, codec, store) = setup();
        let (user, _) = store
            .find_or_create_by_provider_identity(&ProviderProfile {
                identity: ProviderIdentity::google("sub-2"),
                name: "Grace".to_string(),
                email: None,
            })
            .await
            .unwrap();
        let token = codec.encode(&user.id).unwrap();

        store.remove(user.id);

        assert!(matches!(
            resolver.resolve(&token).await,
            Err(AppError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_resolve_invalid_token() {
        let (resolver, _, _) = setup();
        assert!(matches!(
            resolver.resolve("not-a-token").await,
            Err(AppError::InvalidToken)
        ));
    }
}
